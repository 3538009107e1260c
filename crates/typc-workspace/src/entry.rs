//! Entry-document resolution
//!
//! A workspace is compiled from exactly one entry document, identified by a
//! filename suffix convention. Resolution scans only the workspace top level,
//! in sorted order, and refuses to guess: zero matches and multiple matches
//! are both hard errors.

use std::path::{Path, PathBuf};

use crate::copy::sorted_entries;
use crate::{Error, Result};

/// Resolve the entry document of `dir` by filename suffix.
///
/// Returns the single top-level file whose name ends in `suffix`.
/// Zero matches is [`Error::EntryNotFound`]; more than one is
/// [`Error::AmbiguousEntry`] with the candidates listed in sorted order.
pub fn resolve_entry(dir: &Path, suffix: &str) -> Result<PathBuf> {
    let matches = matching_files(dir, |name| name.ends_with(suffix))?;
    single_match(matches, dir, suffix)
}

/// Resolve the one `.typ` document in `dir`, regardless of name.
///
/// Used for unpacked archives that carry a single document instead of a
/// `main.typ`-marked tree. The same zero/many rules apply.
pub fn resolve_single_document(dir: &Path, extension: &str) -> Result<PathBuf> {
    let dotted = format!(".{extension}");
    let matches = matching_files(dir, |name| name.ends_with(&dotted))?;
    single_match(matches, dir, &dotted)
}

fn matching_files(dir: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<String>> {
    let mut matches = Vec::new();
    for entry in sorted_entries(dir)? {
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if accept(&name) {
            matches.push(name);
        }
    }
    Ok(matches)
}

fn single_match(mut matches: Vec<String>, dir: &Path, suffix: &str) -> Result<PathBuf> {
    match matches.len() {
        0 => Err(Error::EntryNotFound {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        }),
        1 => Ok(dir.join(matches.remove(0))),
        _ => Err(Error::AmbiguousEntry {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
            candidates: matches,
        }),
    }
}
