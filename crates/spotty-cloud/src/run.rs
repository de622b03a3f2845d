//! The one-shot `run` orchestration.
//!
//! Strictly sequential: existence check → image resolution → bucket →
//! project sync → template load → snapshot/network resolution → assembly →
//! stack creation → poll → report. Nothing is rolled back on a later
//! failure; the bucket and the synced files are reusable on the next run.

use crate::assemble::{ResolvedInputs, assemble};
use crate::bucket::ensure_project_bucket;
use crate::error::{CloudError, Result};
use crate::provider::{
    Clock, FileSync, Inventory, OnFailure, OutputWriter, Provisioner, StackRequest, StackStatus,
    TemplateStore,
};
use crate::resolve::{resolve_default_network, resolve_image, resolve_snapshot};
use crate::stack::{DEFAULT_POLL_INTERVAL, OUTPUT_INSTANCE_IP, await_terminal, stack_name};
use spotty_core::SpottyConfig;
use std::path::Path;

/// Identifier of the base template in the template store.
pub const TEMPLATE_ID: &str = "run_container";

/// Collaborator handles for one run, constructed by the caller and passed
/// in explicitly.
pub struct Collaborators<'a> {
    pub inventory: &'a dyn Inventory,
    pub provisioner: &'a dyn Provisioner,
    pub templates: &'a dyn TemplateStore,
    pub sync: &'a dyn FileSync,
    pub output: &'a dyn OutputWriter,
    pub clock: &'a dyn Clock,
}

/// How a run ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The stack was created and the instance is reachable.
    Created {
        stack_name: String,
        ip_address: String,
    },
    /// The AMI does not exist yet; the operator was pointed at the image
    /// build step. Not an error.
    ImageNotFound { ami_name: String },
}

/// Provision the instance stack for this project.
pub async fn run(
    c: &Collaborators<'_>,
    config: &SpottyConfig,
    project_dir: &Path,
) -> Result<RunOutcome> {
    let stack_name = stack_name(&config.project.name);
    let instance = &config.instance;

    if c.provisioner.stack_exists(&stack_name).await? {
        return Err(CloudError::StackAlreadyExists(stack_name));
    }

    let Some(image) = resolve_image(c.inventory, &instance.ami_name).await? else {
        c.output
            .write(&format!("Image with Name={} not found.", instance.ami_name));
        c.output
            .write("Use the \"spotty create-ami\" command to create an AMI with Docker.");
        return Ok(RunOutcome::ImageNotFound {
            ami_name: instance.ami_name.clone(),
        });
    };
    tracing::debug!(ami_id = %image.id, ami_name = %image.name, "Resolved AMI");

    let bucket_name = ensure_project_bucket(
        c.inventory,
        c.output,
        &config.project.name,
        &instance.region,
    )
    .await?;

    c.output.write("Syncing the project with S3...");
    c.sync
        .sync(
            project_dir,
            &format!("s3://{}", bucket_name),
            true,
            &config.project.sync_filters,
        )
        .await?;

    c.output.write("Running an instance...");

    let template = c.templates.load_template(TEMPLATE_ID).await?;
    let snapshot = resolve_snapshot(c.inventory, &instance.volume.snapshot_name).await?;
    let network = resolve_default_network(c.inventory).await?;

    let resolved = ResolvedInputs {
        image_id: image.id,
        snapshot,
        network_id: network.id,
        bucket_name,
    };
    let (template, parameters) = assemble(template, config, &resolved, c.output)?;

    let request = StackRequest {
        name: stack_name.clone(),
        template_body: template.to_yaml()?,
        parameters,
        capabilities: vec!["CAPABILITY_IAM".to_string()],
        on_failure: OnFailure::Delete,
    };
    let stack_id = c.provisioner.create_stack(&request).await?;
    tracing::info!(stack_id = %stack_id, "Stack creation submitted");

    c.output.write("Waiting for the stack to be created...");
    let outcome = await_terminal(
        c.provisioner,
        c.clock,
        c.output,
        &stack_id,
        StackStatus::CreateInProgress,
        DEFAULT_POLL_INTERVAL,
    )
    .await?;

    if outcome.status != StackStatus::CreateComplete {
        return Err(CloudError::ProvisioningFailed {
            stack_name,
            status: outcome.status.as_str().to_string(),
        });
    }

    let ip_address = outcome.output(OUTPUT_INSTANCE_IP)?.to_string();
    c.output
        .write(&format!("Stack \"{}\" was successfully created.", stack_name));
    c.output
        .write(&format!("IP address of the instance: {}", ip_address));

    Ok(RunOutcome::Created {
        stack_name,
        ip_address,
    })
}
