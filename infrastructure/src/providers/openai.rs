//! OpenAI-compatible chat-completions gateway.
//!
//! Works with any server exposing `POST {base_url}/chat/completions` with
//! function tools (OpenAI, OpenRouter, vLLM, Ollama, LM Studio, ...).
//!
//! Every request is self-contained: system prompt, full conversation and
//! the calling agent's tool schemas. Nothing is cached between calls.

use async_trait::async_trait;
use crew_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crew_domain::{ContentBlock, LlmResponse, Message, Role, StopReason};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Gateway adapter speaking the chat-completions wire format.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleGateway {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Build a gateway whose key comes from `api_key_env`.
    ///
    /// An empty variable name means the server needs no key.
    pub fn from_env(
        base_url: &str,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let api_key = if api_key_env.is_empty() {
            None
        } else {
            let key = std::env::var(api_key_env)
                .map_err(|_| GatewayError::MissingApiKey(api_key_env.to_string()))?;
            Some(key)
        };
        Self::new(base_url, api_key, timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, GatewayError> {
        let body = request_body(request);
        trace!("Sending chat request: {}", body);
        debug!(
            model = %request.model.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Chat completion request"
        );

        let mut http = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let response = into_llm_response(parsed)?;
        debug!(
            blocks = response.content.len(),
            stop_reason = ?response.stop_reason,
            "Chat completion received"
        );
        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Request JSON for one completion.
fn request_body(request: &CompletionRequest) -> Value {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(json!({"role": "system", "content": request.system_prompt}));
    messages.extend(request.messages.iter().map(wire_message));

    let sampling = &request.model.sampling;
    let mut body = json!({
        "model": request.model.model,
        "messages": messages,
        "temperature": sampling.temperature,
        "top_p": sampling.top_p,
        "max_tokens": sampling.max_tokens,
    });
    if !request.tools.is_empty() {
        body["tools"] = Value::Array(request.tools.iter().map(wire_tool).collect());
    }
    body
}

fn wire_message(message: &Message) -> Value {
    match message.role {
        Role::Assistant if !message.tool_calls.is_empty() => {
            let calls: Vec<Value> = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.native_id.clone().unwrap_or_default(),
                        "type": "function",
                        "function": {
                            "name": call.tool_name,
                            "arguments": call.arguments_json().to_string(),
                        }
                    })
                })
                .collect();
            let content = if message.content.is_empty() {
                Value::Null
            } else {
                Value::String(message.content.clone())
            };
            json!({"role": "assistant", "content": content, "tool_calls": calls})
        }
        Role::Tool => json!({
            "role": "tool",
            "tool_call_id": message.tool_call_id.clone().unwrap_or_default(),
            "content": message.content,
        }),
        role => json!({"role": role.as_str(), "content": message.content}),
    }
}

/// Wrap a neutral `{name, description, input_schema}` schema as a function tool.
fn wire_tool(schema: &Value) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": schema["name"],
            "description": schema["description"],
            "parameters": schema["input_schema"],
        }
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ChatToolCall>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunction,
}

#[derive(Debug, Deserialize)]
struct ChatFunction {
    name: String,
    /// JSON-encoded argument object.
    #[serde(default)]
    arguments: String,
}

fn into_llm_response(response: ChatResponse) -> Result<LlmResponse, GatewayError> {
    let Some(choice) = response.choices.into_iter().next() else {
        return Err(GatewayError::InvalidResponse(
            "Response contained no choices".to_string(),
        ));
    };

    let mut content = Vec::new();
    if let Some(text) = choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text));
    }
    for call in choice.message.tool_calls {
        content.push(ContentBlock::ToolUse {
            input: parse_arguments(&call.function.name, &call.function.arguments)?,
            id: call.id,
            name: call.function.name,
        });
    }

    Ok(LlmResponse {
        content,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model: response.model,
    })
}

fn parse_arguments(tool: &str, raw: &str) -> Result<HashMap<String, Value>, GatewayError> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map_to_hash(map)),
        Ok(Value::Null) => Ok(HashMap::new()),
        Ok(other) => Err(GatewayError::InvalidResponse(format!(
            "Arguments for tool '{}' are not an object: {}",
            tool, other
        ))),
        Err(e) => Err(GatewayError::InvalidResponse(format!(
            "Arguments for tool '{}' are not valid JSON: {}",
            tool, e
        ))),
    }
}

fn map_to_hash(map: Map<String, Value>) -> HashMap<String, Value> {
    map.into_iter().collect()
}
