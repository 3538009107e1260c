//! Tool capability table
//!
//! Operation name -> {input schema, handler}, built once at startup and
//! passed by reference into the dispatch loop. Tool descriptions and
//! schemas are pure configuration and live in the sidecar `tools.json`,
//! embedded at compile time; handlers are bound to them by name during
//! construction, so a sidecar/handler mismatch fails at startup instead of
//! at call time.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use typc_core::CompileService;

use crate::handlers;
use crate::{Error, Result};

/// Sidecar tool table, embedded at compile time.
const TOOL_SIDECAR: &str = include_str!("../tools.json");

/// Future returned by a tool handler.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// A bound tool handler.
pub type ToolHandler = for<'a> fn(&'a CompileService, Value) -> HandlerFuture<'a>;

/// Declarative part of a tool: what clients see in `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The immutable capability table.
pub struct ToolRegistry {
    entries: Vec<(ToolSpec, ToolHandler)>,
}

impl ToolRegistry {
    /// Build the registry from the sidecar table, binding each declared
    /// tool to its handler.
    pub fn builtin() -> Result<Self> {
        let specs: Vec<ToolSpec> = serde_json::from_str(TOOL_SIDECAR)?;
        let mut entries = Vec::with_capacity(specs.len());
        for spec in specs {
            let handler = handlers::handler_for(&spec.name).ok_or_else(|| Error::UnboundTool {
                name: spec.name.clone(),
            })?;
            entries.push((spec, handler));
        }
        Ok(Self { entries })
    }

    /// Declared tools, in sidecar order.
    pub fn specs(&self) -> impl Iterator<Item = &ToolSpec> {
        self.entries.iter().map(|(spec, _)| spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke the named tool.
    pub async fn dispatch(
        &self,
        service: &CompileService,
        name: &str,
        arguments: Value,
    ) -> Result<String> {
        let handler = self
            .entries
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, handler)| *handler)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        handler(service, arguments).await
    }
}
