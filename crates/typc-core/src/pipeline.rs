//! Compile operations
//!
//! [`CompileService`] owns the compiler handle and exposes the three
//! operations both front ends dispatch to. Each call is self-contained and
//! stateless: inputs are validated up front (no scratch directory is
//! created for a bad request), the workspace lives for exactly one
//! invocation, and the artifact is written atomically before the workspace
//! is discarded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use typc_compiler::{Compiler, OutputFormat};
use typc_compose::{Composition, compose};
use typc_workspace::{
    CONTENT_FILE, ENTRY_SUFFIX, StageRequest, StagedWorkspace, resolve_entry,
    resolve_single_document, stage, unpack_zip,
};

use crate::io::write_atomic;
use crate::options::{CompileOptions, ReportOptions};
use crate::output::derived_output_path;
use crate::template::{REPORT_PROTECTED, locate_report_template};
use crate::{Error, Result};

/// The compile operations shared by the CLI and the tool server.
pub struct CompileService {
    compiler: Arc<dyn Compiler>,
}

impl CompileService {
    pub fn new(compiler: Arc<dyn Compiler>) -> Self {
        Self { compiler }
    }

    /// Compile a document directory.
    ///
    /// Stages the directory with any overlays, resolves the entry document
    /// by the `main.typ` suffix convention, and writes the artifact next to
    /// the input directory unless an explicit output path is given.
    pub async fn compile_directory(
        &self,
        source_dir: &Path,
        options: &CompileOptions,
    ) -> Result<PathBuf> {
        let source_dir = canonical_dir(source_dir)?;
        let cover = validated_cover(options.cover_page.as_deref())?;
        let output = self.output_for(&source_dir, options);

        let workspace = stage(&StageRequest {
            content_file: options.content_file.as_deref(),
            content_dir: options.content_dir.as_deref(),
            ..StageRequest::new(&source_dir)
        })?;
        let entry = resolve_entry(workspace.root(), ENTRY_SUFFIX)?;

        self.render(&workspace, &entry, cover.as_deref(), &output, options)
            .await
    }

    /// Compile against the built-in institutional report template.
    ///
    /// The user directory must carry the reserved `content.typ`; the
    /// template is staged first and its own files are protected from
    /// same-named user files. Reports always render to PDF.
    pub async fn compile_report(
        &self,
        source_dir: &Path,
        options: &ReportOptions,
    ) -> Result<PathBuf> {
        let source_dir = canonical_dir(source_dir)?;
        let content = source_dir.join(CONTENT_FILE);
        if !content.is_file() {
            return Err(Error::ContentRequired { path: content });
        }
        let template = locate_report_template()?;
        let cover = validated_cover(options.cover_page.as_deref())?;
        let output = options
            .output
            .clone()
            .unwrap_or_else(|| derived_output_path(&source_dir, OutputFormat::Pdf));

        let workspace = stage(&StageRequest {
            template: Some(&template),
            protected: REPORT_PROTECTED,
            content_file: Some(&content),
            ..StageRequest::new(&source_dir)
        })?;
        // The template supplies the entry document; `protected` keeps it.
        let entry = workspace.join(ENTRY_SUFFIX);

        let compile = CompileOptions {
            cover_strategy: options.cover_strategy,
            ppi: options.ppi,
            ..CompileOptions::default()
        };
        self.render(&workspace, &entry, cover.as_deref(), &output, &compile)
            .await
    }

    /// Compile an uploaded bundle: a zip archive or a single document.
    ///
    /// Archives are expanded into a scratch directory first. The entry is
    /// resolved by the usual suffix convention, falling back to the single
    /// `.typ` document for one-file bundles.
    pub async fn compile_archive(
        &self,
        bundle: &Path,
        options: &CompileOptions,
    ) -> Result<PathBuf> {
        let bundle = canonical_file(bundle)?;
        let cover = validated_cover(options.cover_page.as_deref())?;
        let output = self.output_for(&bundle, options);

        let unpacked = StagedWorkspace::empty()?;
        if bundle.extension().is_some_and(|ext| ext == "zip") {
            unpack_zip(&bundle, unpacked.root())?;
        } else {
            let name = bundle.file_name().unwrap_or_default();
            std::fs::copy(&bundle, unpacked.join(&name.to_string_lossy()))
                .map_err(|e| typc_workspace::Error::io(&bundle, e))?;
        }

        let workspace = stage(&StageRequest {
            content_file: options.content_file.as_deref(),
            content_dir: options.content_dir.as_deref(),
            ..StageRequest::new(unpacked.root())
        })?;
        let entry = match resolve_entry(workspace.root(), ENTRY_SUFFIX) {
            Ok(entry) => entry,
            Err(typc_workspace::Error::EntryNotFound { .. }) => {
                resolve_single_document(workspace.root(), "typ")?
            }
            Err(e) => return Err(e.into()),
        };

        self.render(&workspace, &entry, cover.as_deref(), &output, options)
            .await
    }

    fn output_for(&self, input: &Path, options: &CompileOptions) -> PathBuf {
        options
            .output
            .clone()
            .unwrap_or_else(|| derived_output_path(input, options.format))
    }

    async fn render(
        &self,
        workspace: &StagedWorkspace,
        entry: &Path,
        cover: Option<&Path>,
        output: &Path,
        options: &CompileOptions,
    ) -> Result<PathBuf> {
        let composition = Composition {
            workspace: workspace.root(),
            entry,
            cover_page: cover,
            strategy: options.cover_strategy,
        };
        let bytes = compose(
            self.compiler.as_ref(),
            &composition,
            options.format,
            options.ppi,
        )
        .await?;

        write_atomic(output, &bytes)?;
        tracing::info!(output = %output.display(), "artifact written");
        Ok(output.to_path_buf())
    }
}

/// Canonicalize a required directory argument, failing fast on anything
/// else. Runs before any workspace is created.
fn canonical_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    dunce::canonicalize(path).map_err(|_| Error::InputNotFound {
        path: path.to_path_buf(),
    })
}

/// Canonicalize a required file argument.
fn canonical_file(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    dunce::canonicalize(path).map_err(|_| Error::InputNotFound {
        path: path.to_path_buf(),
    })
}

/// Apply the fail-fast policy to an optional cover-page path.
fn validated_cover(cover: Option<&Path>) -> Result<Option<PathBuf>> {
    match cover {
        None => Ok(None),
        Some(path) => {
            if !path.is_file() {
                return Err(Error::CoverNotFound {
                    path: path.to_path_buf(),
                });
            }
            dunce::canonicalize(path)
                .map(Some)
                .map_err(|_| Error::CoverNotFound {
                    path: path.to_path_buf(),
                })
        }
    }
}
