//! Engine error taxonomy.
//!
//! Every fatal condition of a run maps to exactly one variant here, so the
//! CLI and the tests can match on the failure kind instead of parsing
//! messages. None of these are retried locally.

use thiserror::Error;

/// Kind of external resource being looked up, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Snapshot,
    Network,
    Bucket,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Image => write!(f, "image"),
            ResourceKind::Snapshot => write!(f, "snapshot"),
            ResourceKind::Network => write!(f, "network"),
            ResourceKind::Bucket => write!(f, "bucket"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Several {kind}s matching '{filter}' found")]
    AmbiguousResource { kind: ResourceKind, filter: String },

    #[error("Size of new volume is required (snapshot '{snapshot_name}' not found)")]
    MissingVolumeSize { snapshot_name: String },

    #[error(
        "Requested size of the volume ({requested}GB) is less than size of the snapshot ({snapshot}GB)"
    )]
    VolumeTooSmall { requested: u32, snapshot: u32 },

    #[error("Default VPC not found")]
    NoDefaultNetwork,

    #[error("Stack '{0}' already exists. Use the 'spotty stop' command to delete it first")]
    StackAlreadyExists(String),

    #[error(
        "Stack '{stack_name}' was not created (status: {status}).\nSee CloudFormation and CloudWatch logs for details"
    )]
    ProvisioningFailed { stack_name: String, status: String },

    #[error("Stack completed but output '{key}' is missing")]
    OutputMissing { key: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template parse error: {0}")]
    TemplateParse(#[from] serde_yaml::Error),

    #[error("Cloud API error: {0}")]
    Api(String),

    #[error("Project sync failed: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
