//! Project section of the configuration.

use serde::{Deserialize, Serialize};

/// Project identity and file sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Project name, used to derive the stack and bucket names.
    pub name: String,

    /// Directory on the instance where the project is mounted.
    #[serde(rename = "remoteDir")]
    pub remote_dir: String,

    /// Ordered include/exclude filters applied to the project sync.
    #[serde(default)]
    pub sync_filters: Vec<SyncFilter>,
}

/// A single sync filter rule. Order matters: later rules override earlier
/// ones, matching the semantics of `aws s3 sync --exclude/--include`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncFilter {
    Exclude(Vec<String>),
    Include(Vec<String>),
}

impl ProjectConfig {
    /// Remote directory with any trailing path separator stripped, as
    /// expected by the template parameters.
    pub fn remote_dir_trimmed(&self) -> &str {
        self.remote_dir.trim_end_matches('/')
    }
}
