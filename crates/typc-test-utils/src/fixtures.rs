//! Document-tree fixtures
//!
//! [`DocDir`] builds a named document directory inside a temporary parent,
//! mirroring how users hand real input to typc: the compile output lands
//! next to the directory, so everything stays inside the fixture.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A named document directory under a temporary parent.
#[derive(Debug)]
pub struct DocDir {
    _temp: TempDir,
    parent: PathBuf,
    root: PathBuf,
}

impl DocDir {
    /// Create `<temp>/<name>/`.
    pub fn named(name: &str) -> Self {
        let temp = TempDir::new().expect("create fixture parent");
        // Canonicalized so fixture paths compare equal to the pipeline's
        // canonicalized outputs even when the temp root is a symlink.
        let parent = temp
            .path()
            .canonicalize()
            .expect("canonicalize fixture parent");
        let root = parent.join(name);
        fs::create_dir(&root).expect("create fixture dir");
        Self {
            _temp: temp,
            parent,
            root,
        }
    }

    /// Add a text file at `rel`, creating intermediate directories.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        self.write(rel, contents.as_bytes())
    }

    /// Add a binary file at `rel`.
    pub fn bin_file(self, rel: &str, contents: &[u8]) -> Self {
        self.write(rel, contents)
    }

    fn write(self, rel: &str, contents: &[u8]) -> Self {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture subdir");
        }
        fs::write(path, contents).expect("write fixture file");
        self
    }

    /// The document directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// The temporary parent the output artifact lands in.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Where the default output-path rule puts this directory's artifact.
    pub fn expected_output(&self, extension: &str) -> PathBuf {
        let name = self.root.file_name().unwrap().to_string_lossy();
        self.parent.join(format!("{name}.{extension}"))
    }

    /// Snapshot of every file under the directory as `(relative path, bytes)`,
    /// sorted, for byte-identical before/after comparisons.
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        let mut files = Vec::new();
        collect(&self.root, &self.root, &mut files);
        files.sort();
        files
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).expect("read fixture dir") {
        let path = entry.expect("fixture entry").path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            out.push((rel, fs::read(&path).expect("read fixture file")));
        }
    }
}
