//! Docker workload definition.

use serde::{Deserialize, Serialize};

/// Container to run on the instance: either a registry image or a
/// Dockerfile from the project directory. One of the two is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    /// Image reference, e.g. `tensorflow/tensorflow:latest-gpu`.
    #[serde(default)]
    pub image: Option<String>,

    /// Path to a Dockerfile inside the project, built on the instance.
    #[serde(default)]
    pub file: Option<String>,

    /// Docker data root directory on the attached volume, so that pulled
    /// images and build caches survive instance replacement.
    #[serde(default)]
    pub data_root: Option<String>,
}
