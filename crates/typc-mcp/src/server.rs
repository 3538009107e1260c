//! MCP Server implementation
//!
//! Reads JSON-RPC 2.0 messages line by line from stdin, dispatches them
//! against the tool registry, and writes responses to stdout. Logs go to
//! stderr so they never interfere with the protocol stream.

use std::io::{BufRead, Write};

use serde_json::{Value, json};
use typc_core::CompileService;

use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolResult, ToolsCapability,
};
use crate::registry::ToolRegistry;
use crate::{Error, Result};

/// MCP protocol revision this server speaks.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server for typc.
pub struct McpServer {
    service: CompileService,
    registry: ToolRegistry,
}

impl McpServer {
    /// Build the server, constructing the capability table once.
    pub fn new(service: CompileService) -> Result<Self> {
        let registry = ToolRegistry::builtin()?;
        Ok(Self { service, registry })
    }

    /// Run the stdio message loop until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!(tools = self.registry.len(), "MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // Notification, no response
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, -32603, format!("Internal error: {}", e));
                    writeln!(stdout, "{}", serde_json::to_string(&error_response)?)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    /// Handle a single message; returns the serialized response, or an
    /// empty string for notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" | "notifications/initialized" => return Ok(String::new()),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "typc-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(id, json!(result))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .registry
            .specs()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "description": spec.description,
                    "inputSchema": spec.input_schema,
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Domain errors come back as successful JSON-RPC responses carrying a
    /// tool error payload, so the caller sees the full failure description.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let call: ToolCallParams = serde_json::from_value(params)?;

        let tool_result = match self
            .registry
            .dispatch(&self.service, &call.name, call.arguments)
            .await
        {
            Ok(message) => ToolResult::text(message),
            Err(e) => ToolResult::error(format!("Error compiling Typst document: {}", e)),
        };

        Ok(JsonRpcResponse::success(id, json!(tool_result)))
    }
}
