use crate::output::ConsoleOutput;
use crate::templates::BuiltinTemplates;
use anyhow::Context;
use spotty_cloud::{Collaborators, RunOutcome, TokioClock};
use spotty_cloud_aws::{AwsCliSync, AwsContext, AwsInventory, AwsProvisioner};

pub async fn handle(script_name: Option<&str>) -> anyhow::Result<()> {
    if let Some(script) = script_name {
        tracing::debug!(script = %script, "Script name accepted (runs after instance start)");
    }

    let config_path = spotty_core::find_config_file()?;
    let config = spotty_core::load_config(&config_path)?;
    let project_dir = config_path
        .parent()
        .context("config file has no parent directory")?
        .to_path_buf();

    // One set of region-scoped clients per run.
    let ctx = AwsContext::new(&config.instance.region).await;
    let inventory = AwsInventory::from_context(&ctx);
    let provisioner = AwsProvisioner::from_context(&ctx);
    let sync = AwsCliSync::new(ctx.region());
    let templates = BuiltinTemplates;
    let output = ConsoleOutput;
    let clock = TokioClock;

    let collaborators = Collaborators {
        inventory: &inventory,
        provisioner: &provisioner,
        templates: &templates,
        sync: &sync,
        output: &output,
        clock: &clock,
    };

    // Both outcomes exit with code 0: ImageNotFound already printed its
    // guidance through the output channel.
    match spotty_cloud::run(&collaborators, &config, &project_dir).await? {
        RunOutcome::Created { .. } | RunOutcome::ImageNotFound { .. } => Ok(()),
    }
}
