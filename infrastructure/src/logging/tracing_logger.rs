//! Session transcript through `tracing`.
//!
//! Each attempt is bracketed by `[START]` and `[END]` lines. Events are
//! logged in full (no truncation) under the [`TRANSCRIPT_TARGET`] target so
//! the file layer can keep them while the console filter hides them.

use crew_application::ports::observer::WorkflowObserver;
use crew_domain::WorkflowEvent;
use tracing::{info, warn};

pub const TRANSCRIPT_TARGET: &str = "readme_crew::transcript";

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventLogger;

impl TracingEventLogger {
    pub fn new() -> Self {
        Self
    }
}

/// One transcript line per event.
pub(crate) fn transcript_line(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::AgentSwitched {
            agent,
            from: Some(from),
            reason,
        } => format!(
            "[Agent Switch] {} -> {}{}",
            from,
            agent,
            reason.as_deref().map(|r| format!(" ({})", r)).unwrap_or_default()
        ),
        WorkflowEvent::AgentSwitched { agent, from: None, .. } => {
            format!("[Agent Switch] start -> {}", agent)
        }
        WorkflowEvent::AgentOutput {
            agent,
            text,
            pending_tool_calls,
        } => {
            let mut line = format!("[{}] Output:\n{}", agent, text);
            if !pending_tool_calls.is_empty() {
                line.push_str(&format!("\nPlanned tools: {}", pending_tool_calls.join(", ")));
            }
            line
        }
        WorkflowEvent::ToolInvoked {
            agent,
            tool_name,
            arguments,
        } => format!("[{}] Tool call: {} args={}", agent, tool_name, arguments),
        WorkflowEvent::ToolCompleted {
            agent,
            tool_name,
            result,
            success,
            ..
        } => format!(
            "[{}] Tool {}: {}\n{}",
            agent,
            if *success { "result" } else { "failed" },
            tool_name,
            result
        ),
    }
}

impl WorkflowObserver for TracingEventLogger {
    fn on_event(&self, event: &WorkflowEvent) {
        info!(target: TRANSCRIPT_TARGET, kind = event.kind(), "{}", transcript_line(event));
    }

    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        info!(target: TRANSCRIPT_TARGET, "[START] attempt {}/{}", attempt, max_attempts);
    }

    fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
        match failure {
            None => info!(target: TRANSCRIPT_TARGET, "[END] attempt {} succeeded", attempt),
            Some(reason) => {
                warn!(target: TRANSCRIPT_TARGET, "[END] attempt {} failed: {}", attempt, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_switch_lines() {
        let root = WorkflowEvent::AgentSwitched {
            agent: "ExplorerAgent".into(),
            from: None,
            reason: None,
        };
        assert_eq!(transcript_line(&root), "[Agent Switch] start -> ExplorerAgent");

        let handoff = WorkflowEvent::AgentSwitched {
            agent: "WriterAgent".into(),
            from: Some("ExplorerAgent".into()),
            reason: Some("notes ready".into()),
        };
        assert_eq!(
            transcript_line(&handoff),
            "[Agent Switch] ExplorerAgent -> WriterAgent (notes ready)"
        );
    }

    #[test]
    fn test_output_lists_planned_tools() {
        let event = WorkflowEvent::AgentOutput {
            agent: "ExplorerAgent".into(),
            text: "Scanning".into(),
            pending_tool_calls: vec!["get_directory_structure".into(), "read_file".into()],
        };
        let line = transcript_line(&event);
        assert!(line.starts_with("[ExplorerAgent] Output:\nScanning"));
        assert!(line.ends_with("Planned tools: get_directory_structure, read_file"));
    }

    #[test]
    fn test_tool_lines_are_not_truncated() {
        let long = "x".repeat(10_000);
        let event = WorkflowEvent::ToolCompleted {
            agent: "ExplorerAgent".into(),
            tool_name: "read_file".into(),
            arguments: json!({"file_path": "big.rs"}),
            result: long.clone(),
            success: true,
        };
        assert!(transcript_line(&event).ends_with(&long));

        let failed = WorkflowEvent::ToolCompleted {
            agent: "WriterAgent".into(),
            tool_name: "write_readme".into(),
            arguments: json!({}),
            result: "[ERROR] Permission denied".into(),
            success: false,
        };
        assert!(transcript_line(&failed).starts_with("[WriterAgent] Tool failed: write_readme"));
    }
}
