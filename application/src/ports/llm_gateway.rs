//! LLM Gateway port
//!
//! Defines the interface for communicating with the model oracle.
//!
//! The gateway is stateless: every request carries the full conversation,
//! the calling agent's system prompt and its tool schemas. The shared
//! conversation lives in the orchestrator, not in a provider session.

use async_trait::async_trait;
use crew_domain::{LlmResponse, Message, ModelBinding};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One stateless completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model and sampling parameters of the calling agent.
    pub model: ModelBinding,
    pub system_prompt: String,
    pub messages: Vec<Message>,
    /// Provider-neutral JSON schemas of the callable tools.
    pub tools: Vec<serde_json::Value>,
}

impl CompletionRequest {
    pub fn new(model: ModelBinding, system_prompt: impl Into<String>) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
            tools: Vec::new(),
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = tools;
        self
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one completion. An empty response is returned as `Ok`; deciding
    /// whether it is usable is the caller's job.
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError>;
}
