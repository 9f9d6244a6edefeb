//! `review_readme`: model-backed critique of the written README.
//!
//! The critique is a separate oracle call with its own prompt and a
//! conservative sampling setup. Its raw text is stored as the session's
//! latest feedback; the structured interpretation is best effort.

use crew_application::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crew_domain::tool::{
    builtin::REVIEW_README,
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use crew_domain::{Message, ModelBinding, PromptTemplate, ReviewFeedback, SamplingParams, SessionState};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sampling used for every critique call.
pub const CRITIQUE_SAMPLING: SamplingParams = SamplingParams::new(0.2, 0.4, 8192);

pub fn review_readme_definition() -> ToolDefinition {
    ToolDefinition::new(
        REVIEW_README,
        "Review the README against the Explorer's file notes. Returns JSON with the parsed review \
         (missing_items, incorrect_descriptions, unclear_sections, suggested_patches) and the raw text. \
         Both arguments default to the current session state.",
        ToolEffect::SessionState,
    )
    .with_parameter(ToolParameter::new(
        "readme_text",
        "README text to review (default: the README written this session)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "file_notes",
        "Notes to check the README against (default: all recorded notes)",
        false,
    ))
}

/// Oracle binding for the critique call.
#[derive(Clone)]
pub struct ReadmeCritic {
    gateway: Arc<dyn LlmGateway>,
    model: ModelBinding,
}

impl ReadmeCritic {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: ModelBinding::new(model, CRITIQUE_SAMPLING),
        }
    }

    pub fn model(&self) -> &ModelBinding {
        &self.model
    }
}

impl std::fmt::Debug for ReadmeCritic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadmeCritic")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn notes_text(call: &ToolCall, state: &SessionState) -> String {
    match call.arguments.get("file_notes") {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(v) if !v.is_null() && !v.is_string() => {
            serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
        }
        _ => serde_json::to_string_pretty(&state.notes_json()).unwrap_or_default(),
    }
}

pub async fn execute_review_readme(
    call: &ToolCall,
    state: &mut SessionState,
    critic: Option<&ReadmeCritic>,
) -> ToolResult {
    let Some(critic) = critic else {
        return ToolResult::failure(
            REVIEW_README,
            ToolError::execution_failed("No review model is configured"),
        );
    };

    let readme = match call
        .get_string("readme_text")
        .filter(|t| !t.trim().is_empty())
        .or(state.readme())
    {
        Some(text) => text.to_string(),
        None => {
            return ToolResult::failure(
                REVIEW_README,
                ToolError::invalid_argument(
                    "No README text to review: pass readme_text or call write_readme first",
                ),
            );
        }
    };
    let notes = notes_text(call, state);

    let request = CompletionRequest::new(critic.model.clone(), PromptTemplate::review_system())
        .with_messages(vec![Message::user(PromptTemplate::review_prompt(&readme, &notes))]);

    let raw = match critic.gateway.complete(&request).await {
        Ok(response) => response.text_content(),
        Err(e) => {
            warn!("Review call failed: {}", e);
            return ToolResult::failure(
                REVIEW_README,
                ToolError::execution_failed(format!("Review model call failed: {}", e)),
            );
        }
    };

    if raw.trim().is_empty() {
        return ToolResult::failure(
            REVIEW_README,
            ToolError::execution_failed("Review model returned no text"),
        );
    }

    let parsed = ReviewFeedback::parse_best_effort(&raw);
    debug!(
        structured = parsed.feedback.is_some(),
        clean = parsed.is_clean(),
        "README reviewed"
    );
    state.set_feedback(raw.clone());

    let body = json!({
        "review": parsed.feedback,
        "clean": parsed.is_clean(),
        "raw": raw,
    });
    match serde_json::to_string_pretty(&body) {
        Ok(json) => ToolResult::success(REVIEW_README, json),
        Err(e) => ToolResult::failure(
            REVIEW_README,
            ToolError::execution_failed(format!("Failed to serialize review: {}", e)),
        ),
    }
}
