//! Error types for proc-run.

use thiserror::Error;

/// Call-level failure: the runner could not complete its job.
///
/// A child that exits with a nonzero status is *not* an error; it is a
/// successful call reported through [`crate::RunResult::exit_code`].
#[derive(Error, Debug)]
pub enum ProcRunError {
    /// The temporary stderr capture file could not be created.
    #[error("failed to create stderr capture file: {0}")]
    TempStore(#[source] std::io::Error),

    /// The OS refused to start the child process.
    #[error("failed to start process for `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The blocking task running the child was cancelled or panicked.
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl ProcRunError {
    /// Stable machine-readable code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TempStore(_) => "TEMP_STORE_FAILED",
            Self::Spawn { .. } => "SPAWN_FAILED",
            Self::Join(_) => "JOIN_FAILED",
        }
    }
}

/// Convenience Result type for proc-run operations.
pub type Result<T> = std::result::Result<T, ProcRunError>;
