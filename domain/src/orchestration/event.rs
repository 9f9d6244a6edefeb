//! Workflow events.
//!
//! Emitted by the orchestrator for every agent switch, model output, tool
//! invocation and tool result. Events are transient: observers consume them
//! and they never become part of session state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// Control moved to `agent` (also emitted for the root agent).
    AgentSwitched {
        agent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// One model output, with the tools it asked for.
    AgentOutput {
        agent: String,
        text: String,
        pending_tool_calls: Vec<String>,
    },
    ToolInvoked {
        agent: String,
        tool_name: String,
        arguments: serde_json::Value,
    },
    ToolCompleted {
        agent: String,
        tool_name: String,
        arguments: serde_json::Value,
        result: String,
        success: bool,
    },
}

impl WorkflowEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowEvent::AgentSwitched { .. } => "agent_switched",
            WorkflowEvent::AgentOutput { .. } => "agent_output",
            WorkflowEvent::ToolInvoked { .. } => "tool_invoked",
            WorkflowEvent::ToolCompleted { .. } => "tool_completed",
        }
    }

    pub fn agent(&self) -> &str {
        match self {
            WorkflowEvent::AgentSwitched { agent, .. }
            | WorkflowEvent::AgentOutput { agent, .. }
            | WorkflowEvent::ToolInvoked { agent, .. }
            | WorkflowEvent::ToolCompleted { agent, .. } => agent,
        }
    }
}
