//! JSON-RPC 2.0 message types for the MCP tool server.
//!
//! MCP over stdio frames every message as one line of JSON. The server only
//! answers requests; it never sends requests of its own.
//!
//! - **Requests**: client → server, carry `id` + `method` (`tools/call`, ...)
//! - **Notifications**: client → server, carry `method` only; never answered
//! - **Responses**: server → client, carry `id` + `result` or `error`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;

/// Protocol revisions the server accepts, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// Revision answered when the client asks for one we do not know.
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|v| **v == r))
        .copied()
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

/// An incoming frame. MCP ids may be numbers or strings, so `id` stays raw.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Classification of an incoming frame.
#[derive(Debug, PartialEq)]
pub enum MessageKind {
    Request { id: Value, method: String },
    Notification { method: String },
    /// No method: a stray response or garbage with an id.
    Invalid { id: Value },
}

impl IncomingMessage {
    pub fn kind(&self) -> MessageKind {
        match (&self.id, &self.method) {
            (Some(id), Some(method)) if !id.is_null() => MessageKind::Request {
                id: id.clone(),
                method: method.clone(),
            },
            (_, Some(method)) => MessageKind::Notification {
                method: method.clone(),
            },
            (id, None) => MessageKind::Invalid {
                id: id.clone().unwrap_or(Value::Null),
            },
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

/// JSON-RPC response sent from the server.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn from_result(id: Value, result: Result<Value, RpcError>) -> Self {
        match result {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> IncomingMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn classify_request_with_string_id() {
        let msg = parse(json!({"jsonrpc": "2.0", "id": "a1", "method": "tools/list"}));
        assert_eq!(
            msg.kind(),
            MessageKind::Request {
                id: json!("a1"),
                method: "tools/list".to_string()
            }
        );
    }

    #[test]
    fn classify_notification() {
        let msg = parse(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
        assert_eq!(
            msg.kind(),
            MessageKind::Notification {
                method: "notifications/initialized".to_string()
            }
        );
    }

    #[test]
    fn classify_missing_method() {
        let msg = parse(json!({"jsonrpc": "2.0", "id": 4, "result": {}}));
        assert_eq!(msg.kind(), MessageKind::Invalid { id: json!(4) });
    }

    #[test]
    fn response_omits_unused_half() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!(1), json!({}))).unwrap();
        assert!(ok.get("error").is_none());
        assert_eq!(ok["jsonrpc"], "2.0");

        let err = serde_json::to_value(JsonRpcResponse::error(
            Value::Null,
            RpcError::new(PARSE_ERROR, "bad json"),
        ))
        .unwrap();
        assert!(err.get("result").is_none());
        assert_eq!(err["error"]["code"], -32700);
        assert_eq!(err["id"], Value::Null);
    }

    #[test]
    fn version_negotiation() {
        assert_eq!(negotiate_version(Some("2024-11-05")), "2024-11-05");
        assert_eq!(negotiate_version(Some("1999-01-01")), "2025-06-18");
        assert_eq!(negotiate_version(None), "2025-06-18");
    }
}
