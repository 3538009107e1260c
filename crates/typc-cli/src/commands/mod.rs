//! Command implementations

mod compile;
mod mcp;
mod report;

pub use compile::run_compile;
pub use mcp::run_mcp;
pub use report::run_report;
