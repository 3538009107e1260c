//! `typc compile`

use std::path::Path;

use colored::Colorize;
use typc_core::{CompileOptions, CompileService};

use crate::error::Result;

/// Compile a document directory or a zip bundle.
pub async fn run_compile(
    service: &CompileService,
    input: &Path,
    options: CompileOptions,
) -> Result<()> {
    let output = if input.is_file() {
        service.compile_archive(input, &options).await?
    } else {
        service.compile_directory(input, &options).await?
    };

    println!("{} output at {}", "compiled,".green().bold(), output.display());
    Ok(())
}
