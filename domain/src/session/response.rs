//! Structured model output.
//!
//! A model turn yields text, tool-use requests, or both. Gateways translate
//! their provider's wire format into [`LlmResponse`]; the orchestrator only
//! ever sees this shape.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within a model response.
///
/// # Examples
///
/// ```
/// use crew_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Let me read that file.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "read_file".to_string(),
///     input: [("path".to_string(), serde_json::json!("src/main.rs"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_text().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(String),

    /// A tool use request.
    ToolUse {
        /// Provider-assigned ID for correlating with the tool result.
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason` string.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" => StopReason::EndTurn,
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A structured model response.
///
/// # Examples
///
/// ```
/// use crew_domain::session::response::LlmResponse;
///
/// let response = LlmResponse::from_text("# Demo");
/// assert_eq!(response.text_content(), "# Demo");
/// assert!(!response.has_tool_calls());
/// assert!(!response.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier, if returned by the API.
    pub model: Option<String>,
}

impl LlmResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Response consisting only of tool-use blocks.
    pub fn from_tool_calls(calls: impl IntoIterator<Item = ToolCall>) -> Self {
        let content = calls
            .into_iter()
            .enumerate()
            .map(|(i, call)| ContentBlock::ToolUse {
                id: call.native_id.unwrap_or_else(|| format!("call_{}", i)),
                name: call.tool_name,
                input: call.arguments,
            })
            .collect();
        Self {
            content,
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    /// Response with no content blocks at all.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            stop_reason: None,
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` blocks as `ToolCall`s, in emission order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// `true` when there is neither non-blank text nor any tool call.
    pub fn is_empty(&self) -> bool {
        !self.has_tool_calls() && self.text_content().trim().is_empty()
    }
}
