//! Error types for typc-compose

use std::path::PathBuf;

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing the final artifact
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The primary compiler pass failed; kept transparent so the backend's
    /// diagnostics (or a timeout) surface unchanged.
    #[error(transparent)]
    Compiler(#[from] typc_compiler::Error),

    /// The post-compile PDF merge failed. Distinct from a compiler failure:
    /// the primary compile already succeeded.
    #[error("PDF merge failed: {source}")]
    Merge {
        #[source]
        source: lopdf::Error,
    },

    /// A document fed to the merge step is structurally unusable.
    #[error("PDF merge failed: {message}")]
    MalformedPdf { message: String },

    /// A cover page was supplied for a non-PDF target. Both strategies
    /// produce and consume PDF pages.
    #[error("cover-page composition requires PDF output, got {format}")]
    CoverRequiresPdf { format: typc_compiler::OutputFormat },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
