//! Error types for typc-core

use std::path::PathBuf;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a compile operation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input path does not exist.
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Report compilation needs the reserved content document.
    #[error("content.typ not found at {}; a report compilation requires it", path.display())]
    ContentRequired { path: PathBuf },

    /// A cover-page path was given but does not exist.
    #[error("cover page given but not found: {}", path.display())]
    CoverNotFound { path: PathBuf },

    /// The built-in report template is absent. This is a packaging defect
    /// of the installation, not a problem with the user's input.
    #[error(
        "built-in report template missing (broken installation); searched: {}",
        searched.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    TemplateMissing { searched: Vec<PathBuf> },

    /// Staging the scratch workspace failed.
    #[error(transparent)]
    Workspace(#[from] typc_workspace::Error),

    /// Composition failed: a compiler failure or timeout, or a PDF merge
    /// failure, each keeping its own diagnostics.
    #[error(transparent)]
    Compose(#[from] typc_compose::Error),

    #[error("failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the failure was the compiler exceeding its time budget.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Compose(typc_compose::Error::Compiler(e)) if e.is_timeout()
        )
    }
}
