//! AWS implementations of the Spotty collaborator traits.
//!
//! Clients are constructed once per run from a shared, region-scoped SDK
//! config and passed to the engine explicitly. Project sync shells out to
//! the `aws` CLI (`aws s3 sync`), which owns the delta computation.

pub mod error;
pub mod inventory;
pub mod provisioner;
pub mod sync;

pub use error::AwsError;
pub use inventory::AwsInventory;
pub use provisioner::AwsProvisioner;
pub use sync::AwsCliSync;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Region-scoped AWS SDK configuration shared by all clients of one run.
pub struct AwsContext {
    config: SdkConfig,
    region: String,
}

impl AwsContext {
    /// Load credentials and region from the environment/profile chain,
    /// pinned to `region`.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            config,
            region: region.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn ec2_client(&self) -> aws_sdk_ec2::Client {
        aws_sdk_ec2::Client::new(&self.config)
    }

    pub fn s3_client(&self) -> aws_sdk_s3::Client {
        aws_sdk_s3::Client::new(&self.config)
    }

    pub fn cloudformation_client(&self) -> aws_sdk_cloudformation::Client {
        aws_sdk_cloudformation::Client::new(&self.config)
    }
}
