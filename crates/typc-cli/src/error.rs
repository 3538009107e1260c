//! Error types for typc-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the compile pipeline
    #[error(transparent)]
    Core(#[from] typc_core::Error),

    /// Error from the embedded MCP server
    #[error(transparent)]
    Mcp(#[from] typc_mcp::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
