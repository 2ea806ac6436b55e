use thiserror::Error;

/// Error types for driver-testkit operations.
#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' was terminated by a signal")]
    Signaled { program: String, code: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TestkitError {
    /// Process exit code to report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TestkitError::Signaled { code, .. } => *code,
            TestkitError::Spawn { .. } | TestkitError::InvalidConfig(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TestkitError>;
