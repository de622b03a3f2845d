use thiserror::Error;

/// Errors internal to the AWS collaborators; mapped to the engine's error
/// taxonomy at the trait boundary.
#[derive(Error, Debug)]
pub enum AwsError {
    #[error("The 'aws' CLI was not found on PATH. Install the AWS CLI to enable project sync")]
    AwsCliNotFound,

    #[error("aws CLI command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AwsError>;
