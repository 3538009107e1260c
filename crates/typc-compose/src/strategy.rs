//! Strategy selection
//!
//! Two mutually exclusive ways to attach a cover page, chosen by the
//! caller and applied only when a cover is present:
//!
//! - [`CoverStrategy::Embed`]: single compiler pass; the cover's raw bytes
//!   are placed through a source-level directive before compiling. Needs
//!   the backend's PDF-embedding capability and a PDF target.
//! - [`CoverStrategy::Merge`]: compile the body untouched, then concatenate
//!   cover and body PDFs. Keeps the cover's original rendering exactly
//!   (no re-rasterization, no font substitution), which is why it is the
//!   default.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use typc_compiler::{CompileRequest, Compiler, OutputFormat};

use crate::embed::inject_cover;
use crate::merge::prepend_cover;
use crate::{Error, Result};

/// How a cover page is attached to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverStrategy {
    /// Source-level embed directive, single compiler pass.
    Embed,
    /// Post-compile PDF concatenation.
    #[default]
    Merge,
}

impl fmt::Display for CoverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Embed => "embed",
            Self::Merge => "merge",
        })
    }
}

impl FromStr for CoverStrategy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "embed" => Ok(Self::Embed),
            "merge" => Ok(Self::Merge),
            other => Err(format!("unknown cover strategy `{other}` (expected embed or merge)")),
        }
    }
}

/// One composition request against an already-staged workspace.
#[derive(Debug)]
pub struct Composition<'a> {
    /// Root of the staged scratch workspace.
    pub workspace: &'a Path,
    /// Entry document inside the workspace. Mutated only by `Embed`.
    pub entry: &'a Path,
    /// Optional cover-page PDF, outside the workspace.
    pub cover_page: Option<&'a Path>,
    /// Strategy applied when `cover_page` is present.
    pub strategy: CoverStrategy,
}

impl<'a> Composition<'a> {
    pub fn plain(workspace: &'a Path, entry: &'a Path) -> Self {
        Self {
            workspace,
            entry,
            cover_page: None,
            strategy: CoverStrategy::default(),
        }
    }
}

/// Produce the final artifact bytes for `composition`.
///
/// Without a cover page this is a single compiler pass, returned verbatim.
/// With one, the selected strategy runs. Either way the compiler is invoked
/// exactly once.
pub async fn compose(
    compiler: &dyn Compiler,
    composition: &Composition<'_>,
    format: OutputFormat,
    ppi: f64,
) -> Result<Vec<u8>> {
    let request = CompileRequest {
        entry: composition.entry.to_path_buf(),
        format,
        ppi,
    };

    let Some(cover) = composition.cover_page else {
        return Ok(compiler.compile(&request).await?);
    };

    // Both strategies produce and consume PDF pages.
    if format != OutputFormat::Pdf {
        return Err(Error::CoverRequiresPdf { format });
    }

    match composition.strategy {
        CoverStrategy::Embed => {
            inject_cover(composition.workspace, composition.entry, cover)?;
            Ok(compiler.compile(&request).await?)
        }
        CoverStrategy::Merge => {
            let body = compiler.compile(&request).await?;
            let cover_bytes = fs::read(cover).map_err(|e| Error::io(cover, e))?;
            prepend_cover(&cover_bytes, &body)
        }
    }
}
