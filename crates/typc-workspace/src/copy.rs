//! One-direction copy helpers
//!
//! Everything here copies from an immutable origin into the scratch
//! workspace. No function in this module ever writes to its source.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Copy a single file, creating parent directories in the destination.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::copy(src, dst).map_err(|e| Error::io(src, e))?;
    Ok(())
}

/// Recursively copy the contents of `src` into `dst`, overwriting
/// same-named destination entries.
///
/// Directory listings are walked in sorted order so repeated runs stage
/// files identically.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    for entry in sorted_entries(src)? {
        let target = dst.join(entry.file_name());
        let path = entry.path();
        if path.is_dir() {
            copy_dir_contents(&path, &target)?;
        } else {
            copy_file(&path, &target)?;
        }
    }
    Ok(())
}

/// Copy one top-level entry (file or directory) of `src` into `dst`.
pub fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_contents(src, dst)
    } else {
        copy_file(src, dst)
    }
}

/// Read a directory's entries sorted by file name.
///
/// Sorting makes collision resolution and entry-document lookup
/// deterministic across platforms and repeated runs.
pub fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
