//! Output-path derivation
//!
//! The default rule writes the artifact next to the input, named after it:
//! `<parent-of-input>/<input-basename>.<ext>`. An explicit output name
//! (CLI `--output`) produces `<name>.<ext>` instead.

use std::path::{Path, PathBuf};

use typc_compiler::OutputFormat;

/// Default output path for `input` (a directory or archive file).
///
/// `input` should already be absolute so the artifact lands next to the
/// real location, not relative to the current directory.
pub fn derived_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = if input.is_dir() {
        input.file_name()
    } else {
        input.file_stem()
    };
    let stem = stem.map(|n| n.to_string_lossy()).unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{stem}.{}", format.extension()))
}

/// Output path for an explicit `--output <name>`.
pub fn named_output_path(name: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{name}.{}", format.extension()))
}
