//! `record_notes`: upsert an Explorer note into session state.

use crew_domain::SessionState;
use crew_domain::session::state::DEFAULT_NOTES_TITLE;
use crew_domain::tool::{
    builtin::RECORD_NOTES,
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use tracing::debug;

pub const NOTES_RECORDED: &str = "Notes successfully recorded.";

pub fn record_notes_definition() -> ToolDefinition {
    ToolDefinition::new(
        RECORD_NOTES,
        "Record analysis notes about the project (structure, entry points, dependencies, usage). \
         Notes with the same title are replaced.",
        ToolEffect::SessionState,
    )
    .with_parameter(ToolParameter::new("notes", "The notes text", true))
    .with_parameter(ToolParameter::new(
        "notes_title",
        "Title to store the notes under (default: project_overview)",
        false,
    ))
}

pub fn execute_record_notes(call: &ToolCall, state: &mut SessionState) -> ToolResult {
    let notes = match call.require_string("notes") {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(RECORD_NOTES, ToolError::invalid_argument(e)),
    };
    let title = call
        .get_string("notes_title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_NOTES_TITLE);

    let replaced = state.record_note(title, notes);
    debug!(title, replaced, chars = notes.chars().count(), "Recorded notes");

    ToolResult::success(RECORD_NOTES, NOTES_RECORDED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        SessionState::new("/work/demo", "", "/work/demo/README.md")
    }

    #[test]
    fn test_default_title() {
        let mut state = state();
        let call = ToolCall::new(RECORD_NOTES).with_arg("notes", "Entry point: main.py");

        let result = execute_record_notes(&call, &mut state);

        assert_eq!(result.output(), Some(NOTES_RECORDED));
        assert_eq!(state.notes()[DEFAULT_NOTES_TITLE], "Entry point: main.py");
    }

    #[test]
    fn test_same_title_overwrites() {
        let mut state = state();
        for text in ["first", "second"] {
            let call = ToolCall::new(RECORD_NOTES)
                .with_arg("notes", text)
                .with_arg("notes_title", "config");
            execute_record_notes(&call, &mut state);
        }

        assert_eq!(state.notes().len(), 1);
        assert_eq!(state.notes()["config"], "second");
    }

    #[test]
    fn test_missing_notes() {
        let mut state = state();
        let result = execute_record_notes(&ToolCall::new(RECORD_NOTES), &mut state);
        assert!(!result.is_success());
        assert!(state.notes().is_empty());
    }
}
