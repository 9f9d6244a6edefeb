//! Tool schema conversion port.
//!
//! Separates "which tools an agent may call" (domain) from "how to serialize
//! them for the API" (infrastructure).

use crew_domain::tool::entities::ToolDefinition;

/// Port for converting tool definitions to provider-neutral JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert a list of tools, preserving their order.
    fn tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
