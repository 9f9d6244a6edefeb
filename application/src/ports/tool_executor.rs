//! Tool Executor port
//!
//! Defines the interface for executing tools against the shared session
//! state.

use async_trait::async_trait;
use crew_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};
use crew_domain::SessionState;

/// Port for tool execution
///
/// Execution takes the session state by `&mut`: a tool call sees every
/// mutation made by earlier calls and may make its own. The orchestrator
/// runs calls one at a time, so no locking is involved.
///
/// Failures are returned as failed [`ToolResult`]s, never as errors.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall, state: &mut SessionState) -> ToolResult;
}
