//! Error types for typc-workspace

use std::path::PathBuf;

/// Result type for staging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while staging a scratch workspace
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("overlay path given but not found: {}", path.display())]
    OverlayNotFound { path: PathBuf },

    #[error("no file ending in `{suffix}` found in {}", dir.display())]
    EntryNotFound { dir: PathBuf, suffix: String },

    #[error(
        "multiple files ending in `{suffix}` found in {}: {}",
        dir.display(),
        candidates.join(", ")
    )]
    AmbiguousEntry {
        dir: PathBuf,
        suffix: String,
        candidates: Vec<String>,
    },

    #[error("failed to read archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive entry escapes extraction root: {name}")]
    ArchiveEntryEscapes { name: String },

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
