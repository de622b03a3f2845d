//! Model types for the `spotty.yaml` configuration file.

mod docker;
mod instance;
mod project;
mod volume;

// Re-exports
pub use docker::*;
pub use instance::*;
pub use project::*;
pub use volume::*;

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Root of the `spotty.yaml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpottyConfig {
    pub project: ProjectConfig,
    pub instance: InstanceConfig,
}

impl SpottyConfig {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.project.name.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "project.name must not be empty".to_string(),
            ));
        }
        if !self
            .project
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::InvalidConfig(format!(
                "project.name '{}' may only contain alphanumeric characters and '-'",
                self.project.name
            )));
        }
        if self.project.remote_dir.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "project.remoteDir must not be empty".to_string(),
            ));
        }
        if self.instance.region.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "instance.region must not be empty".to_string(),
            ));
        }
        if self.instance.instance_type.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "instance.instanceType must not be empty".to_string(),
            ));
        }
        if self.instance.ami_name.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "instance.amiName must not be empty".to_string(),
            ));
        }
        if self.instance.volume.snapshot_name.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "instance.volume.snapshotName must not be empty".to_string(),
            ));
        }
        if self.instance.docker.image.is_none() && self.instance.docker.file.is_none() {
            return Err(ConfigError::InvalidConfig(
                "instance.docker requires either 'image' or 'file'".to_string(),
            ));
        }
        Ok(())
    }
}
