//! Stack lifecycle driver.
//!
//! Submits the assembled template and polls the provisioning service until
//! the status leaves the in-progress value. There is no local timeout: the
//! provider's own on-failure deletion is the only cleanup path.

use crate::error::{CloudError, Result};
use crate::provider::{Clock, OutputWriter, Provisioner, StackStatus};
use std::collections::HashMap;
use std::time::Duration;

/// Interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Stack output carrying the instance address.
pub const OUTPUT_INSTANCE_IP: &str = "InstanceIpAddress";

/// Stack name for a project.
pub fn stack_name(project_name: &str) -> String {
    format!("spotty-instance-{}", project_name)
}

/// Terminal state of a stack, with its published outputs.
#[derive(Debug, Clone)]
pub struct StackOutcome {
    pub status: StackStatus,
    pub outputs: HashMap<String, String>,
}

impl StackOutcome {
    /// Look up an expected output. Absence on a completed stack is an
    /// inconsistency, not a user error.
    pub fn output(&self, key: &str) -> Result<&str> {
        self.outputs
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CloudError::OutputMissing {
                key: key.to_string(),
            })
    }
}

/// Poll until the stack status differs from `waiting_status`, reporting
/// every observed transition.
pub async fn await_terminal(
    provisioner: &dyn Provisioner,
    clock: &dyn Clock,
    output: &dyn OutputWriter,
    stack_id: &str,
    waiting_status: StackStatus,
    poll_interval: Duration,
) -> Result<StackOutcome> {
    let mut last_reported = waiting_status.clone();

    loop {
        let (status, outputs) = provisioner.stack_status(stack_id).await?;

        if status != last_reported {
            tracing::debug!(stack_id = %stack_id, status = %status, "Stack status changed");
            output.write(&format!("Stack status: {}", status));
            last_reported = status.clone();
        }

        if status != waiting_status {
            return Ok(StackOutcome { status, outputs });
        }

        clock.sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{InstantClock, MockProvisioner, RecordingOutput};

    #[test]
    fn stack_name_format() {
        assert_eq!(stack_name("mnist"), "spotty-instance-mnist");
    }

    #[tokio::test]
    async fn polls_until_terminal() {
        let provisioner = MockProvisioner::default()
            .with_status(StackStatus::CreateInProgress, HashMap::new())
            .with_status(StackStatus::CreateInProgress, HashMap::new())
            .with_status(
                StackStatus::CreateComplete,
                HashMap::from([("InstanceIpAddress".to_string(), "1.2.3.4".to_string())]),
            );
        let clock = InstantClock::default();
        let output = RecordingOutput::default();

        let outcome = await_terminal(
            &provisioner,
            &clock,
            &output,
            "stack-1",
            StackStatus::CreateInProgress,
            DEFAULT_POLL_INTERVAL,
        )
        .await
        .unwrap();

        assert_eq!(outcome.status, StackStatus::CreateComplete);
        assert_eq!(outcome.output(OUTPUT_INSTANCE_IP).unwrap(), "1.2.3.4");
        // Two in-progress polls, so the clock slept twice.
        assert_eq!(clock.sleeps(), 2);
        assert_eq!(output.messages(), vec!["Stack status: CREATE_COMPLETE"]);
    }

    #[tokio::test]
    async fn rollback_is_terminal() {
        let provisioner = MockProvisioner::default()
            .with_status(StackStatus::CreateInProgress, HashMap::new())
            .with_status(StackStatus::RollbackInProgress, HashMap::new());
        let clock = InstantClock::default();
        let output = RecordingOutput::default();

        let outcome = await_terminal(
            &provisioner,
            &clock,
            &output,
            "stack-1",
            StackStatus::CreateInProgress,
            DEFAULT_POLL_INTERVAL,
        )
        .await
        .unwrap();

        assert_eq!(outcome.status, StackStatus::RollbackInProgress);
    }

    #[tokio::test]
    async fn missing_output_is_inconsistency() {
        let outcome = StackOutcome {
            status: StackStatus::CreateComplete,
            outputs: HashMap::new(),
        };
        let err = outcome.output(OUTPUT_INSTANCE_IP).unwrap_err();
        assert!(matches!(err, CloudError::OutputMissing { .. }));
    }
}
