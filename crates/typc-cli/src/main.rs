//! typc command-line interface
//!
//! Assembles a Typst document directory into a scratch workspace, runs the
//! external compiler, and writes the rendered artifact next to the input.

mod cli;
mod commands;
mod error;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use typc_compiler::TypstCli;
use typc_core::{CompileOptions, CompileService, ReportOptions, named_output_path};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let compiler = TypstCli::with_binary(&cli.typst).timeout(Duration::from_secs(cli.timeout));
    let service = CompileService::new(Arc::new(compiler));

    match cli.command {
        Commands::Compile {
            dir,
            output,
            type_output,
            ppi,
            content_file,
            content_dir,
            cover,
            cover_strategy,
        } => {
            let format = type_output.into();
            let options = CompileOptions {
                content_file,
                content_dir,
                cover_page: cover,
                cover_strategy: cover_strategy.into(),
                format,
                ppi,
                output: output.as_deref().map(|name| named_output_path(name, format)),
            };
            commands::run_compile(&service, &dir, options).await
        }
        Commands::Report {
            dir,
            output,
            cover,
            cover_strategy,
        } => {
            let options = ReportOptions {
                cover_page: cover,
                cover_strategy: cover_strategy.into(),
                output: output
                    .as_deref()
                    .map(|name| named_output_path(name, typc_compiler::OutputFormat::Pdf)),
                ..ReportOptions::default()
            };
            commands::run_report(&service, &dir, options).await
        }
        Commands::Mcp => commands::run_mcp(service).await,
    }
}
