//! Instance section of the configuration.

use crate::model::{DockerConfig, VolumeSpec};
use serde::{Deserialize, Serialize};

/// Desired shape of the spot instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    /// AWS region the instance and all its resources live in.
    pub region: String,

    /// EC2 instance type, e.g. `p2.xlarge`.
    pub instance_type: String,

    /// EC2 key pair name. Optional; without it SSH key login is disabled.
    #[serde(default)]
    pub key_name: Option<String>,

    /// Name of the AMI to launch, created beforehand by `spotty create-ami`.
    pub ami_name: String,

    /// TCP ports to open on the instance in addition to SSH.
    #[serde(default)]
    pub ports: Vec<u16>,

    /// Containerized workload definition.
    pub docker: DockerConfig,

    /// Durable data volume attached to the instance.
    pub volume: VolumeSpec,
}

impl InstanceConfig {
    /// Key pair name, treating an empty string the same as absent.
    pub fn key_name(&self) -> Option<&str> {
        self.key_name.as_deref().filter(|name| !name.is_empty())
    }
}
