//! `typc mcp`

use typc_core::CompileService;
use typc_mcp::McpServer;

use crate::error::Result;

/// Run the MCP tool server on stdio until the client disconnects.
pub async fn run_mcp(service: CompileService) -> Result<()> {
    let server = McpServer::new(service)?;
    server.run().await?;
    Ok(())
}
