//! External compiler interface for typc
//!
//! The typesetting engine is a black box behind the [`Compiler`] trait:
//! entry document path + output format + resolution in, rendered bytes out.
//! The shipped implementation, [`TypstCli`], spawns the `typst` binary as a
//! child process with an enforced wall-clock timeout.

pub mod error;
pub mod format;
pub mod typst;

pub use error::{Error, Result};
pub use format::OutputFormat;
pub use typst::{DEFAULT_TIMEOUT, TypstCli};

use std::path::PathBuf;

use async_trait::async_trait;

/// One compilation request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileRequest {
    /// Absolute path of the entry document inside the workspace.
    pub entry: PathBuf,
    /// Requested output format.
    pub format: OutputFormat,
    /// Raster resolution in pixels per inch; only meaningful for PNG.
    pub ppi: f64,
}

impl CompileRequest {
    /// A PDF request at the default resolution.
    pub fn pdf(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            format: OutputFormat::Pdf,
            ppi: format::DEFAULT_PPI,
        }
    }
}

/// A document compiler.
///
/// Implementations must be side-effect free with respect to the workspace:
/// they read the entry document and its siblings, and return the rendered
/// artifact as bytes without writing anything themselves.
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn compile(&self, request: &CompileRequest) -> Result<Vec<u8>>;
}
