//! Source-level cover embedding (strategy A)
//!
//! Prepends a prologue to the entry document that places the cover PDF's
//! raw bytes as a full-page object before any other content, then lets the
//! compiler render everything in a single pass. The prologue wording and
//! statement order are part of the contract with the backend:
//!
//! 1. a page-margin configuration statement,
//! 2. the import of the PDF-embedding package,
//! 3. the invocation reading the cover's raw bytes (no text decoding).

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Embedding package pinned for reproducible renders.
const EMBED_PACKAGE: &str = "@preview/muchpdf:0.1.0";

/// Build the prologue that places `cover_filename` at the start of the
/// rendered document.
pub fn cover_prologue(cover_filename: &str) -> String {
    format!(
        "#set page(margin: (left: 2cm, right: 2cm, top: 2cm, bottom: 2cm))\n\
         #import \"{EMBED_PACKAGE}\": muchpdf\n\
         \n\
         #muchpdf(read(\"{cover_filename}\", encoding: none))\n\
         \n"
    )
}

/// Copy `cover` into the workspace and prepend the embed prologue to the
/// entry document, before all of its existing content.
pub fn inject_cover(workspace: &Path, entry: &Path, cover: &Path) -> Result<()> {
    let cover_name = cover
        .file_name()
        .ok_or_else(|| Error::io(cover, std::io::Error::other("cover path has no file name")))?;
    let staged_cover = workspace.join(cover_name);
    fs::copy(cover, &staged_cover).map_err(|e| Error::io(cover, e))?;

    let body = fs::read_to_string(entry).map_err(|e| Error::io(entry, e))?;
    let prologue = cover_prologue(&cover_name.to_string_lossy());
    fs::write(entry, format!("{prologue}{body}")).map_err(|e| Error::io(entry, e))?;

    tracing::debug!(cover = %staged_cover.display(), "embedded cover prologue");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prologue_statement_order() {
        let prologue = cover_prologue("title.pdf");
        let margin = prologue.find("#set page(margin:").unwrap();
        let import = prologue.find("#import \"@preview/muchpdf:0.1.0\": muchpdf").unwrap();
        let invoke = prologue
            .find("#muchpdf(read(\"title.pdf\", encoding: none))")
            .unwrap();
        assert!(margin < import && import < invoke);
    }

    #[test]
    fn prologue_lands_before_existing_content() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("main.typ");
        fs::write(&entry, "#set text(size: 12pt)\n= Report\n").unwrap();
        let cover = temp.path().join("cover.pdf");
        fs::write(&cover, b"%PDF-1.5 fake").unwrap();

        let workspace = TempDir::new().unwrap();
        let staged_entry = workspace.path().join("main.typ");
        fs::copy(&entry, &staged_entry).unwrap();

        inject_cover(workspace.path(), &staged_entry, &cover).unwrap();

        let mutated = fs::read_to_string(&staged_entry).unwrap();
        let prologue_at = mutated.find("#muchpdf").unwrap();
        let original_at = mutated.find("#set text(size: 12pt)").unwrap();
        assert!(prologue_at < original_at);
        assert!(workspace.path().join("cover.pdf").is_file());
    }

    #[test]
    fn cover_file_itself_is_untouched() {
        let temp = TempDir::new().unwrap();
        let cover = temp.path().join("cover.pdf");
        fs::write(&cover, b"cover-bytes").unwrap();

        let workspace = TempDir::new().unwrap();
        let entry = workspace.path().join("main.typ");
        fs::write(&entry, "body").unwrap();

        inject_cover(workspace.path(), &entry, &cover).unwrap();
        assert_eq!(fs::read(&cover).unwrap(), b"cover-bytes");
    }
}
