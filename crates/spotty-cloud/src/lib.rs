//! Spotty provisioning engine
//!
//! This crate contains the decision logic of Spotty: resolving external
//! resource identifiers (AMI, snapshot, default VPC), provisioning the
//! project bucket, assembling the CloudFormation template from the resolved
//! state and the user configuration, and driving the stack creation to a
//! terminal status.
//!
//! All cloud I/O happens behind the collaborator traits in [`provider`];
//! the AWS implementations live in the `spotty-cloud-aws` crate, and tests
//! substitute in-memory fakes. Clients are constructed once per run and
//! passed in explicitly.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  spotty CLI                     │
//! │                 (spotty run)                    │
//! └───────────────────┬────────────────────────────┘
//!                     │
//! ┌───────────────────▼────────────────────────────┐
//! │                spotty-cloud                     │
//! │  resolve → bucket → sync → assemble → stack    │
//! │  trait Inventory / Provisioner / FileSync …    │
//! └───────────────────┬────────────────────────────┘
//!                     │
//! ┌───────────────────▼────────────────────────────┐
//! │              spotty-cloud-aws                   │
//! │        EC2 / S3 / CloudFormation clients        │
//! └────────────────────────────────────────────────┘
//! ```

pub mod assemble;
pub mod bucket;
pub mod error;
pub mod provider;
pub mod resolve;
pub mod run;
pub mod stack;
pub mod template;

#[cfg(test)]
pub(crate) mod test_util;

// Re-exports
pub use assemble::{ResolvedInputs, assemble};
pub use bucket::{bucket_prefix, ensure_project_bucket};
pub use error::{CloudError, ResourceKind, Result};
pub use provider::{
    BucketAcl, Clock, FileSync, Image, Inventory, Network, OutputWriter, Parameter, Provisioner,
    Snapshot, StackRequest, StackStatus, TemplateStore, TokioClock,
};
pub use run::{Collaborators, RunOutcome, run};
pub use stack::{StackOutcome, await_terminal, stack_name};
pub use template::Template;
