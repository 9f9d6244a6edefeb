//! Interpretation of a single model output.
//!
//! Handoff is expressed as a synthetic tool, [`HANDOFF_TOOL`], that the
//! orchestrator adds to every agent with handoff targets. A model output is
//! then one of three actions: a final answer, a batch of tool calls, or a
//! handoff (possibly preceded by tool calls that run first).

use crate::session::response::LlmResponse;
use crate::tool::entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter};
use thiserror::Error;

/// Name of the synthetic handoff tool.
pub const HANDOFF_TOOL: &str = "handoff";

/// Build the handoff tool definition for an agent with the given targets.
///
/// `to_agent` is restricted to exactly those targets, so schema-enforcing
/// providers reject other names before the orchestrator has to.
pub fn handoff_tool_definition(targets: &[String]) -> ToolDefinition {
    ToolDefinition::new(
        HANDOFF_TOOL,
        format!(
            "Transfer control to another agent. The conversation and session state carry over. Allowed agents: {}.",
            targets.join(", ")
        ),
        ToolEffect::ReadOnly,
    )
    .with_parameter(
        ToolParameter::new("to_agent", "Name of the agent to hand control to", true)
            .with_allowed_values(targets.iter().map(String::as_str)),
    )
    .with_parameter(ToolParameter::new(
        "reason",
        "Why control is being handed over and what the next agent should do",
        false,
    ))
}

/// What an agent asked for in one model output.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// No tool calls and no handoff: the run ends with this answer.
    Final(String),
    /// Tool calls to execute before the agent continues.
    UseTools(Vec<ToolCall>),
    /// Transfer control to `to` after executing `preceding_calls`.
    Handoff {
        to: String,
        reason: Option<String>,
        preceding_calls: Vec<ToolCall>,
    },
}

/// Output that cannot be turned into an [`AgentAction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("model returned no text and no tool calls")]
    Empty,

    #[error("{0} handoff calls in a single output; at most one is allowed")]
    MultipleHandoffs(usize),

    #[error("handoff call is missing the 'to_agent' argument")]
    MissingHandoffTarget,
}

impl AgentAction {
    /// Classify a model response.
    ///
    /// Tool calls keep their emission order. A single handoff call may
    /// appear anywhere in the output; ordinary calls always run before it.
    pub fn classify(response: &LlmResponse) -> Result<Self, ActionError> {
        if response.is_empty() {
            return Err(ActionError::Empty);
        }

        let (handoffs, calls): (Vec<ToolCall>, Vec<ToolCall>) = response
            .tool_calls()
            .into_iter()
            .partition(|c| c.tool_name == HANDOFF_TOOL);

        match handoffs.len() {
            0 if calls.is_empty() => Ok(AgentAction::Final(response.text_content())),
            0 => Ok(AgentAction::UseTools(calls)),
            1 => {
                let handoff = &handoffs[0];
                let to = handoff
                    .get_string("to_agent")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(ActionError::MissingHandoffTarget)?;
                Ok(AgentAction::Handoff {
                    to: to.to_string(),
                    reason: handoff.get_string("reason").map(str::to_string),
                    preceding_calls: calls,
                })
            }
            n => Err(ActionError::MultipleHandoffs(n)),
        }
    }

    /// Tool calls that must run before this action takes effect.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            AgentAction::Final(_) => &[],
            AgentAction::UseTools(calls) => calls,
            AgentAction::Handoff {
                preceding_calls, ..
            } => preceding_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handoff(to: &str) -> ToolCall {
        ToolCall::new(HANDOFF_TOOL).with_arg("to_agent", to)
    }

    #[test]
    fn test_text_only_is_final() {
        let action = AgentAction::classify(&LlmResponse::from_text("# Done")).unwrap();
        assert_eq!(action, AgentAction::Final("# Done".into()));
        assert!(action.tool_calls().is_empty());
    }

    #[test]
    fn test_tool_calls_are_use_tools() {
        let response = LlmResponse::from_tool_calls(vec![
            ToolCall::new("read_file").with_arg("file_path", "a.rs"),
            ToolCall::new("record_notes").with_arg("notes", "x"),
        ]);
        match AgentAction::classify(&response).unwrap() {
            AgentAction::UseTools(calls) => {
                assert_eq!(calls[0].tool_name, "read_file");
                assert_eq!(calls[1].tool_name, "record_notes");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_handoff_keeps_preceding_calls_in_order() {
        let response = LlmResponse::from_tool_calls(vec![
            ToolCall::new("record_notes").with_arg("notes", "first"),
            handoff("WriterAgent").with_arg("reason", "notes complete"),
            ToolCall::new("record_notes").with_arg("notes", "second"),
        ]);
        match AgentAction::classify(&response).unwrap() {
            AgentAction::Handoff {
                to,
                reason,
                preceding_calls,
            } => {
                assert_eq!(to, "WriterAgent");
                assert_eq!(reason.as_deref(), Some("notes complete"));
                assert_eq!(preceding_calls.len(), 2);
                assert_eq!(preceding_calls[0].get_string("notes"), Some("first"));
                assert_eq!(preceding_calls[1].get_string("notes"), Some("second"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_two_handoffs_rejected() {
        let response =
            LlmResponse::from_tool_calls(vec![handoff("WriterAgent"), handoff("ReviewerAgent")]);
        assert_eq!(
            AgentAction::classify(&response).unwrap_err(),
            ActionError::MultipleHandoffs(2)
        );
    }

    #[test]
    fn test_handoff_without_target_rejected() {
        let response = LlmResponse::from_tool_calls(vec![ToolCall::new(HANDOFF_TOOL)]);
        assert_eq!(
            AgentAction::classify(&response).unwrap_err(),
            ActionError::MissingHandoffTarget
        );
    }

    #[test]
    fn test_empty_output_rejected() {
        assert_eq!(
            AgentAction::classify(&LlmResponse::empty()).unwrap_err(),
            ActionError::Empty
        );
        assert_eq!(
            AgentAction::classify(&LlmResponse::from_text("  ")).unwrap_err(),
            ActionError::Empty
        );
    }

    #[test]
    fn test_handoff_definition_restricts_targets() {
        let def = handoff_tool_definition(&["WriterAgent".to_string()]);
        assert_eq!(def.name, HANDOFF_TOOL);
        let to_agent = def.parameters.iter().find(|p| p.name == "to_agent").unwrap();
        assert!(to_agent.required);
        assert_eq!(to_agent.allowed_values, vec!["WriterAgent".to_string()]);
    }
}
