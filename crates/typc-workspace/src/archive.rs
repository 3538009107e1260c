//! Zip-archive expansion
//!
//! Uploaded document bundles arrive as zip archives; they are expanded into
//! a scratch directory before staging. Entry names are validated so an
//! archive cannot write outside its extraction root.

use std::fs;
use std::io;
use std::path::Path;

use zip::ZipArchive;

use crate::{Error, Result};

/// Expand `archive` into `dest`.
///
/// Entries whose names would escape `dest` (absolute paths, `..` traversal)
/// abort the extraction.
pub fn unpack_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| Error::Archive {
        path: archive.to_path_buf(),
        source: e,
    })?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| Error::Archive {
            path: archive.to_path_buf(),
            source: e,
        })?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(Error::ArchiveEntryEscapes {
                name: entry.name().to_string(),
            });
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let mut out = fs::File::create(&target).map_err(|e| Error::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| Error::io(&target, e))?;
    }

    tracing::debug!(archive = %archive.display(), dest = %dest.display(), "expanded archive");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn build_zip(entries: &[(&str, &str)]) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundle.zip");
        let file = fs::File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        (temp, path)
    }

    #[test]
    fn unpacks_nested_entries() {
        let (_guard, archive) = build_zip(&[
            ("main.typ", "= Title"),
            ("images/fig.png", "png-bytes"),
        ]);
        let dest = TempDir::new().unwrap();

        unpack_zip(&archive, dest.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("main.typ")).unwrap(),
            "= Title"
        );
        assert_eq!(
            fs::read_to_string(dest.path().join("images/fig.png")).unwrap(),
            "png-bytes"
        );
    }

    #[test]
    fn rejects_traversal_entries() {
        let (_guard, archive) = build_zip(&[("../escape.typ", "nope")]);
        let dest = TempDir::new().unwrap();

        let err = unpack_zip(&archive, dest.path()).unwrap_err();
        assert!(matches!(err, Error::ArchiveEntryEscapes { .. }));
        assert!(!dest.path().parent().unwrap().join("escape.typ").exists());
    }

    #[test]
    fn missing_archive_is_io_error() {
        let dest = TempDir::new().unwrap();
        let err = unpack_zip(Path::new("/no/such/bundle.zip"), dest.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn garbage_archive_is_archive_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.zip");
        fs::write(&path, "not a zip").unwrap();
        let dest = TempDir::new().unwrap();

        let err = unpack_zip(&path, dest.path()).unwrap_err();
        assert!(matches!(err, Error::Archive { .. }));
    }
}
