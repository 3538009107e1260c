//! Workspace staging
//!
//! Builds the scratch directory a compile request runs against. Staging
//! order establishes the overlay precedence, highest to lowest:
//!
//! 1. content directory's reserved `content.typ`
//! 2. the `content_file` argument (renamed to `content.typ` on copy)
//! 3. content directory's other files
//! 4. source directory files
//! 5. template baseline
//!
//! A given-but-missing overlay path is an error, never a silent skip: a
//! typo'd path would otherwise surface as a confusing missing-content
//! document much later.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::copy::{copy_dir_contents, copy_entry, copy_file, sorted_entries};
use crate::{CONTENT_FILE, Error, Result};

/// Inputs for one staging pass.
#[derive(Debug)]
pub struct StageRequest<'a> {
    /// Directory holding the caller's document tree. Required.
    pub source_dir: &'a Path,

    /// Optional file copied into the workspace as `content.typ`.
    pub content_file: Option<&'a Path>,

    /// Optional directory whose contents are copied over the staged tree;
    /// its own `content.typ`, when present, wins over everything else.
    pub content_dir: Option<&'a Path>,

    /// Optional template baseline, staged before the source directory.
    pub template: Option<&'a Path>,

    /// Template filenames that same-named source files may not overwrite.
    /// Only meaningful together with `template`.
    pub protected: &'a [&'a str],
}

impl<'a> StageRequest<'a> {
    /// Request staging a plain source directory with no overlays.
    pub fn new(source_dir: &'a Path) -> Self {
        Self {
            source_dir,
            ..Default::default()
        }
    }
}

impl Default for StageRequest<'_> {
    fn default() -> Self {
        Self {
            source_dir: Path::new(""),
            content_file: None,
            content_dir: None,
            template: None,
            protected: &[],
        }
    }
}

/// An assembled scratch workspace.
///
/// Holds the backing temporary directory; dropping the value removes the
/// directory and everything staged into it.
#[derive(Debug)]
pub struct StagedWorkspace {
    temp: TempDir,
}

impl StagedWorkspace {
    /// Create an empty scratch workspace.
    pub fn empty() -> Result<Self> {
        let temp = TempDir::new().map_err(|e| Error::io(std::env::temp_dir(), e))?;
        Ok(Self { temp })
    }

    /// Root of the scratch directory.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Absolute path of `name` inside the workspace.
    pub fn join(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }
}

/// Assemble a scratch workspace from `request`.
///
/// All inputs are validated before the temporary directory is created, so a
/// bad request never leaks a scratch directory.
pub fn stage(request: &StageRequest<'_>) -> Result<StagedWorkspace> {
    validate(request)?;

    let workspace = StagedWorkspace::empty()?;
    let root = workspace.root();

    if let Some(template) = request.template {
        copy_dir_contents(template, root)?;
    }

    stage_source(request, root)?;

    if let Some(content_file) = request.content_file {
        copy_file(content_file, &root.join(CONTENT_FILE))?;
    }

    if let Some(content_dir) = request.content_dir {
        copy_dir_contents(content_dir, root)?;
        // The reserved content file found via the directory always wins,
        // even over the explicit content_file argument.
        let reserved = content_dir.join(CONTENT_FILE);
        if reserved.is_file() {
            copy_file(&reserved, &root.join(CONTENT_FILE))?;
        }
    }

    tracing::debug!(root = %root.display(), "staged workspace");
    Ok(workspace)
}

fn validate(request: &StageRequest<'_>) -> Result<()> {
    let source = request.source_dir;
    if !source.exists() {
        return Err(Error::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(Error::NotADirectory {
            path: source.to_path_buf(),
        });
    }
    for overlay in [request.content_file, request.content_dir] {
        if let Some(path) = overlay
            && !path.exists()
        {
            return Err(Error::OverlayNotFound {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Copy source entries over the staged baseline.
///
/// With a template present, the protected template files must survive, and
/// the reserved content file is skipped here because it is only ever staged
/// through the explicit overlay steps.
fn stage_source(request: &StageRequest<'_>, root: &Path) -> Result<()> {
    let guard_template = request.template.is_some();
    for entry in sorted_entries(request.source_dir)? {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if guard_template
            && (request.protected.contains(&name_str.as_ref()) || name_str == CONTENT_FILE)
        {
            continue;
        }
        copy_entry(&entry.path(), &root.join(&name))?;
    }
    Ok(())
}
