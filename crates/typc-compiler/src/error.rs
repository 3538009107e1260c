//! Error types for typc-compiler

use std::path::PathBuf;
use std::time::Duration;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while invoking the external compiler
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The compiler binary could not be started.
    #[error("failed to launch compiler `{}`: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran and rejected the document. `stderr` carries the
    /// backend's diagnostics verbatim.
    #[error("compiler exited with status {status}:\n{stderr}")]
    CompileFailed { status: i32, stderr: String },

    /// The compiler exceeded its wall-clock budget and was killed.
    #[error("compiler exceeded the {}s time budget", budget.as_secs())]
    Timeout { budget: Duration },
}

impl Error {
    /// Whether the failure is a timeout, for callers that retry with a
    /// larger budget.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
