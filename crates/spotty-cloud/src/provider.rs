//! Collaborator traits and the value types crossing them.
//!
//! The engine talks to the outside world exclusively through these traits.
//! Implementations are region-scoped at construction time; no method takes
//! a region, and no process-wide client state exists.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spotty_core::SyncFilter;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// A machine image matched by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
}

/// A volume snapshot matched by its Name tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    /// Size of the snapshotted volume in GiB.
    pub size_gb: u32,
}

/// A network (VPC) the instance can be placed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
}

/// Canned ACL applied to a newly created bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketAcl {
    Private,
    PublicRead,
}

/// Read-mostly inventory of cloud resources, plus bucket creation.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// List machine images whose name equals `name`.
    async fn list_images(&self, name: &str) -> Result<Vec<Image>>;

    /// List snapshots whose Name tag equals `name_tag`.
    async fn list_snapshots(&self, name_tag: &str) -> Result<Vec<Snapshot>>;

    /// List the default networks of the region. A region has at most one
    /// default VPC, but the provider API still answers with a list.
    async fn list_default_networks(&self) -> Result<Vec<Network>>;

    /// List the names of all buckets owned by the account.
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Create a bucket in the client's region.
    async fn create_bucket(&self, name: &str, acl: BucketAcl) -> Result<()>;
}

/// One `(key, value)` template parameter. Order is preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What the provider does with partially created resources when stack
/// creation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Delete,
    Rollback,
    DoNothing,
}

/// A fully assembled stack creation request. Immutable after submission.
#[derive(Debug, Clone)]
pub struct StackRequest {
    pub name: String,
    pub template_body: String,
    pub parameters: Vec<Parameter>,
    pub capabilities: Vec<String>,
    pub on_failure: OnFailure,
}

/// Provisioning stack status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackStatus {
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    RollbackInProgress,
    RollbackComplete,
    DeleteInProgress,
    DeleteComplete,
    Other(String),
}

impl StackStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "CREATE_IN_PROGRESS" => StackStatus::CreateInProgress,
            "CREATE_COMPLETE" => StackStatus::CreateComplete,
            "CREATE_FAILED" => StackStatus::CreateFailed,
            "ROLLBACK_IN_PROGRESS" => StackStatus::RollbackInProgress,
            "ROLLBACK_COMPLETE" => StackStatus::RollbackComplete,
            "DELETE_IN_PROGRESS" => StackStatus::DeleteInProgress,
            "DELETE_COMPLETE" => StackStatus::DeleteComplete,
            other => StackStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StackStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            StackStatus::CreateComplete => "CREATE_COMPLETE",
            StackStatus::CreateFailed => "CREATE_FAILED",
            StackStatus::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            StackStatus::RollbackComplete => "ROLLBACK_COMPLETE",
            StackStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            StackStatus::DeleteComplete => "DELETE_COMPLETE",
            StackStatus::Other(other) => other,
        }
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote stack provisioning service.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Whether a stack with this name exists in any live state.
    async fn stack_exists(&self, name: &str) -> Result<bool>;

    /// Submit the stack creation request, returning the stack id.
    async fn create_stack(&self, request: &StackRequest) -> Result<String>;

    /// Current status and published outputs of the stack.
    async fn stack_status(&self, stack_id: &str)
    -> Result<(StackStatus, HashMap<String, String>)>;
}

/// Source of the base infrastructure template.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn load_template(&self, id: &str) -> Result<crate::template::Template>;
}

/// Project file sync to remote object storage.
#[async_trait]
pub trait FileSync: Send + Sync {
    /// Sync `local_dir` to `remote_uri`. With `delete` set, files absent
    /// locally are removed remotely.
    async fn sync(
        &self,
        local_dir: &Path,
        remote_uri: &str,
        delete: bool,
        filters: &[SyncFilter],
    ) -> Result<()>;
}

/// One-way progress channel towards the operator. Never blocks the engine.
pub trait OutputWriter: Send + Sync {
    fn write(&self, message: &str);
}

/// Injectable time source for the status poll, so tests run without real
/// delays.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer.
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
