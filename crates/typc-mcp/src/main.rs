//! typc MCP server binary
//!
//! A Model Context Protocol server that exposes typc document compilation
//! to agentic clients.
//!
//! # Usage
//!
//! ```bash
//! typc-mcp [--typst <binary>] [--timeout <seconds>]
//! ```
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use typc_compiler::TypstCli;
use typc_core::CompileService;
use typc_mcp::McpServer;

/// MCP server for typc
#[derive(Parser)]
#[command(name = "typc-mcp")]
#[command(about = "MCP server exposing Typst document compilation as tools")]
#[command(version)]
struct Args {
    /// Typst compiler binary
    #[arg(long, default_value = "typst")]
    typst: PathBuf,

    /// Wall-clock budget for one compiler run, in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout is reserved for the MCP protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("typc_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(typst = ?args.typst, "starting typc-mcp server");

    let compiler = TypstCli::with_binary(args.typst).timeout(Duration::from_secs(args.timeout));
    let service = CompileService::new(Arc::new(compiler));
    let server = McpServer::new(service)?;
    server.run().await?;

    Ok(())
}
