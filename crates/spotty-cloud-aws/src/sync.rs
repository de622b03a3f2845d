//! Project sync via the `aws s3 sync` CLI.
//!
//! The CLI owns delta computation and parallel upload; this wrapper only
//! assembles the argument list and surfaces failures.

use crate::error::AwsError;
use async_trait::async_trait;
use spotty_cloud::{CloudError, FileSync};
use spotty_core::SyncFilter;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

pub struct AwsCliSync {
    region: String,
}

impl AwsCliSync {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    async fn run_aws(&self, args: &[String]) -> Result<String, AwsError> {
        tracing::debug!(args = ?args, "Running: aws");

        let output = Command::new("aws")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    AwsError::AwsCliNotFound
                } else {
                    AwsError::Io(err)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AwsError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Build the `aws s3 sync` argument list. Filter order is preserved:
/// later rules override earlier ones.
fn sync_args(
    region: &str,
    local_dir: &Path,
    remote_uri: &str,
    delete: bool,
    filters: &[SyncFilter],
) -> Vec<String> {
    let mut args = vec![
        "s3".to_string(),
        "sync".to_string(),
        local_dir.display().to_string(),
        remote_uri.to_string(),
        "--region".to_string(),
        region.to_string(),
    ];

    if delete {
        args.push("--delete".to_string());
    }

    for filter in filters {
        match filter {
            SyncFilter::Exclude(patterns) => {
                for pattern in patterns {
                    args.push("--exclude".to_string());
                    args.push(pattern.clone());
                }
            }
            SyncFilter::Include(patterns) => {
                for pattern in patterns {
                    args.push("--include".to_string());
                    args.push(pattern.clone());
                }
            }
        }
    }

    args
}

#[async_trait]
impl FileSync for AwsCliSync {
    async fn sync(
        &self,
        local_dir: &Path,
        remote_uri: &str,
        delete: bool,
        filters: &[SyncFilter],
    ) -> spotty_cloud::Result<()> {
        let args = sync_args(&self.region, local_dir, remote_uri, delete, filters);
        self.run_aws(&args)
            .await
            .map_err(|err| CloudError::Sync(err.to_string()))?;
        Ok(())
    }
}
