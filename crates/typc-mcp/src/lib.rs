//! MCP server for typc
//!
//! Exposes the compile pipeline via the Model Context Protocol so agentic
//! clients can request document compilation by tool name with structured
//! arguments.
//!
//! # Architecture
//!
//! ```text
//! [ MCP client (agent/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ typc-mcp (this crate) ]
//!        | (tool registry: name -> {schema, handler})
//!        v
//! [ typc-core (compile pipeline) ]
//! ```
//!
//! The tool registry is an immutable capability table built once at
//! startup from a sidecar `tools.json`, then passed by reference into the
//! dispatch loop.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;

pub use error::{Error, Result};
pub use registry::{ToolRegistry, ToolSpec};
pub use server::McpServer;
