//! Built-in report template location
//!
//! The institutional report template ships with the installation. It is
//! looked up, in order: explicit environment override, a `report-template`
//! directory next to the executable, and the in-repo assets directory for
//! development builds. A miss everywhere is a packaging defect, reported
//! distinctly from user input errors.

use std::env;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the template location.
pub const TEMPLATE_DIR_ENV: &str = "TYPC_REPORT_TEMPLATE";

/// Template files that same-named user files may not overwrite.
pub const REPORT_PROTECTED: &[&str] = &["main.typ", "logo.png"];

/// Locate the report template directory.
pub fn locate_report_template() -> Result<PathBuf> {
    let mut searched = Vec::new();

    if let Ok(dir) = env::var(TEMPLATE_DIR_ENV) {
        let path = PathBuf::from(dir);
        if is_template_dir(&path) {
            return Ok(path);
        }
        searched.push(path);
    }

    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let path = dir.join("report-template");
        if is_template_dir(&path) {
            return Ok(path);
        }
        searched.push(path);
    }

    let dev = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/report_template");
    if is_template_dir(&dev) {
        return Ok(dev);
    }
    searched.push(dev);

    Err(Error::TemplateMissing { searched })
}

/// A usable template directory must carry its own entry document.
fn is_template_dir(path: &Path) -> bool {
    path.join("main.typ").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_assets_resolve_without_override() {
        // The in-repo assets are always present for development builds.
        let template = locate_report_template().unwrap();
        assert!(template.join("main.typ").is_file());
        assert!(template.join("logo.png").is_file());
    }

    #[test]
    fn protected_set_covers_the_template_entry() {
        assert!(REPORT_PROTECTED.contains(&"main.typ"));
    }
}
