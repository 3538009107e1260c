//! `typc report`

use std::path::Path;

use colored::Colorize;
use typc_core::{CompileService, ReportOptions};

use crate::error::Result;

/// Compile a report from the built-in template.
pub async fn run_report(
    service: &CompileService,
    dir: &Path,
    options: ReportOptions,
) -> Result<()> {
    let output = service.compile_report(dir, &options).await?;

    println!("{} output at {}", "compiled,".green().bold(), output.display());
    Ok(())
}
