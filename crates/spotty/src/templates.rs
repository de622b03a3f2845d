use async_trait::async_trait;
use spotty_cloud::{CloudError, Result, Template, TemplateStore};

/// Base template for the instance stack, shipped with the binary.
const RUN_CONTAINER: &str = include_str!("../templates/run_container.yaml");

/// Template store backed by the embedded assets.
pub struct BuiltinTemplates;

#[async_trait]
impl TemplateStore for BuiltinTemplates {
    async fn load_template(&self, id: &str) -> Result<Template> {
        match id {
            "run_container" => Template::from_yaml(RUN_CONTAINER),
            other => Err(CloudError::InvalidTemplate(format!(
                "unknown template '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedded_template_parses() {
        let template = BuiltinTemplates
            .load_template("run_container")
            .await
            .unwrap();
        assert!(template.has_parameter("VpcId"));
        assert!(template.has_parameter("KeyName"));
        template.validate().unwrap();
    }

    #[tokio::test]
    async fn unknown_template_rejected() {
        let err = BuiltinTemplates.load_template("nope").await.unwrap_err();
        assert!(matches!(err, CloudError::InvalidTemplate(_)));
    }
}
