//! Scripted test doubles shared by the use case tests.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::observer::WorkflowObserver;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use async_trait::async_trait;
use crew_domain::{
    AgentDefinition, LlmResponse, ModelBinding, SamplingParams, SessionState, ToolCall,
    ToolDefinition, ToolEffect, ToolError, ToolResult, ToolSpec, WorkflowEvent, HANDOFF_TOOL,
};
use std::collections::VecDeque;
use std::sync::Mutex;

// ==================== Gateway ====================

/// Gateway that replays a fixed queue of responses and records requests.
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<LlmResponse>>,
    /// When set, the final response is replayed forever.
    repeat_last: bool,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            repeat_last: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(responses: Vec<LlmResponse>) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(responses)
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn system_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.system_prompt.clone())
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if self.repeat_last && responses.len() == 1 {
            return Ok(responses[0].clone());
        }
        responses
            .pop_front()
            .ok_or_else(|| GatewayError::Other("No more responses".to_string()))
    }
}

// ==================== Tools ====================

/// Executor with three in-memory tools:
///
/// - `record_notes(notes, notes_title)` upserts a note
/// - `note_count()` reports how many notes exist
/// - `read_file(file_path)` fails for paths containing "missing"
pub struct MockToolExecutor {
    spec: ToolSpec,
    pub executed: Mutex<Vec<String>>,
}

impl MockToolExecutor {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::new()
                .register(ToolDefinition::new(
                    "record_notes",
                    "Record notes",
                    ToolEffect::SessionState,
                ))
                .register(ToolDefinition::new(
                    "note_count",
                    "Count notes",
                    ToolEffect::ReadOnly,
                ))
                .register(ToolDefinition::new(
                    "read_file",
                    "Read a file",
                    ToolEffect::ReadOnly,
                )),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for MockToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall, state: &mut SessionState) -> ToolResult {
        self.executed.lock().unwrap().push(call.tool_name.clone());
        match call.tool_name.as_str() {
            "record_notes" => {
                let title = call.get_string("notes_title").unwrap_or("project_overview");
                let notes = call.get_string("notes").unwrap_or_default();
                state.record_note(title, notes);
                ToolResult::success("record_notes", "Notes recorded.")
            }
            "note_count" => ToolResult::success("note_count", state.notes().len().to_string()),
            "read_file" => {
                let path = call.get_string("file_path").unwrap_or_default();
                if path.contains("missing") {
                    ToolResult::failure("read_file", ToolError::not_found(path))
                } else {
                    ToolResult::success("read_file", format!("contents of {}", path))
                }
            }
            other => ToolResult::failure(other, ToolError::unknown_tool(other)),
        }
    }
}

/// Schema converter that keeps only names.
pub struct MockToolSchema;

impl ToolSchemaPort for MockToolSchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        serde_json::json!({ "name": tool.name })
    }
}

// ==================== Observer ====================

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<WorkflowEvent>>,
    pub attempts: Mutex<Vec<(u32, Option<String>)>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn switches(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                WorkflowEvent::AgentSwitched { agent, .. } => Some(agent),
                _ => None,
            })
            .collect()
    }
}

impl WorkflowObserver for RecordingObserver {
    fn on_event(&self, event: &WorkflowEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
        self.attempts
            .lock()
            .unwrap()
            .push((attempt, failure.map(str::to_string)));
    }
}

// ==================== Builders ====================

pub fn agent(name: &str) -> AgentDefinition {
    AgentDefinition::new(
        name,
        format!("{} for tests", name),
        ModelBinding::new("test-model", SamplingParams::default()),
    )
    .with_system_prompt(format!("You are {}.", name))
}

pub fn tool(name: &str) -> ToolCall {
    ToolCall::new(name)
}

pub fn handoff(to: &str) -> ToolCall {
    ToolCall::new(HANDOFF_TOOL).with_arg("to_agent", to)
}

pub fn calls(calls: Vec<ToolCall>) -> LlmResponse {
    LlmResponse::from_tool_calls(calls)
}

pub fn text(text: &str) -> LlmResponse {
    LlmResponse::from_text(text)
}

pub fn state() -> SessionState {
    SessionState::new("/work/demo", "", "/work/demo/README.md")
}
