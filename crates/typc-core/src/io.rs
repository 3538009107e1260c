//! Atomic output writes
//!
//! The final artifact only ever appears at the output path complete:
//! bytes go to a sibling temp file first, get flushed to disk under an
//! advisory lock, and land via rename.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Write `content` to `path` atomically.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem.
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let write = |temp_path: &Path| -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        file.lock_exclusive()?;
        file.write_all(content)?;
        file.sync_all()?;
        file.unlock()?;
        Ok(())
    };

    if let Err(source) = write(&temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(())
}
