//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the compile pipeline
    #[error(transparent)]
    Core(#[from] typc_core::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid tool arguments
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Unknown tool requested
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The sidecar tool table names a tool with no bound handler —
    /// a build defect caught at startup.
    #[error("tool `{name}` declared in sidecar but has no handler")]
    UnboundTool { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
