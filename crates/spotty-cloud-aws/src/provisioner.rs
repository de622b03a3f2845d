//! CloudFormation backed provisioner.

use crate::AwsContext;
use async_trait::async_trait;
use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use aws_sdk_cloudformation::types::{
    Capability, OnFailure as CfnOnFailure, Parameter as CfnParameter,
};
use spotty_cloud::provider::OnFailure;
use spotty_cloud::{CloudError, Provisioner, Result, StackRequest, StackStatus};
use std::collections::HashMap;

pub struct AwsProvisioner {
    cfn: aws_sdk_cloudformation::Client,
}

impl AwsProvisioner {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            cfn: ctx.cloudformation_client(),
        }
    }
}

#[async_trait]
impl Provisioner for AwsProvisioner {
    async fn stack_exists(&self, name: &str) -> Result<bool> {
        match self.cfn.describe_stacks().stack_name(name).send().await {
            Ok(response) => Ok(!response.stacks().is_empty()),
            Err(err) => {
                // DescribeStacks answers a missing stack with a validation
                // error, not an empty list.
                let service_err = err.into_service_error();
                let message = service_err.message().unwrap_or_default();
                if message.contains("does not exist") {
                    Ok(false)
                } else {
                    Err(CloudError::Api(service_err.to_string()))
                }
            }
        }
    }

    async fn create_stack(&self, request: &StackRequest) -> Result<String> {
        let on_failure = match request.on_failure {
            OnFailure::Delete => CfnOnFailure::Delete,
            OnFailure::Rollback => CfnOnFailure::Rollback,
            OnFailure::DoNothing => CfnOnFailure::DoNothing,
        };

        let mut call = self
            .cfn
            .create_stack()
            .stack_name(&request.name)
            .template_body(&request.template_body)
            .on_failure(on_failure);

        for parameter in &request.parameters {
            call = call.parameters(
                CfnParameter::builder()
                    .parameter_key(&parameter.key)
                    .parameter_value(&parameter.value)
                    .build(),
            );
        }
        for capability in &request.capabilities {
            call = call.capabilities(Capability::from(capability.as_str()));
        }

        let response = call
            .send()
            .await
            .map_err(|err| CloudError::Api(err.into_service_error().to_string()))?;

        response
            .stack_id()
            .map(str::to_string)
            .ok_or_else(|| CloudError::Api("CreateStack returned no stack id".to_string()))
    }

    async fn stack_status(
        &self,
        stack_id: &str,
    ) -> Result<(StackStatus, HashMap<String, String>)> {
        let response = self
            .cfn
            .describe_stacks()
            .stack_name(stack_id)
            .send()
            .await
            .map_err(|err| CloudError::Api(err.into_service_error().to_string()))?;

        let stack = response
            .stacks()
            .first()
            .ok_or_else(|| CloudError::Api(format!("stack '{}' not found", stack_id)))?;

        let status = stack
            .stack_status()
            .map(|status| StackStatus::parse(status.as_str()))
            .ok_or_else(|| CloudError::Api("stack has no status".to_string()))?;

        let outputs = stack
            .outputs()
            .iter()
            .filter_map(|output| {
                Some((
                    output.output_key()?.to_string(),
                    output.output_value()?.to_string(),
                ))
            })
            .collect();

        Ok((status, outputs))
    }
}
