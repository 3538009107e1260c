//! Per-operation option bags

use std::path::PathBuf;

use typc_compiler::{OutputFormat, format::DEFAULT_PPI};
use typc_compose::CoverStrategy;

/// Options for directory and archive compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Optional file staged as the reserved `content.typ`.
    pub content_file: Option<PathBuf>,
    /// Optional directory overlaid onto the staged tree.
    pub content_dir: Option<PathBuf>,
    /// Optional cover-page PDF.
    pub cover_page: Option<PathBuf>,
    /// Strategy applied when a cover page is present.
    pub cover_strategy: CoverStrategy,
    pub format: OutputFormat,
    pub ppi: f64,
    /// Explicit output path; `None` derives one next to the input.
    pub output: Option<PathBuf>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            content_file: None,
            content_dir: None,
            cover_page: None,
            cover_strategy: CoverStrategy::default(),
            format: OutputFormat::Pdf,
            ppi: DEFAULT_PPI,
            output: None,
        }
    }
}

/// Options for report compilation. Reports always render to PDF.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub cover_page: Option<PathBuf>,
    pub cover_strategy: CoverStrategy,
    pub ppi: f64,
    pub output: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            cover_page: None,
            cover_strategy: CoverStrategy::default(),
            ppi: DEFAULT_PPI,
            output: None,
        }
    }
}
