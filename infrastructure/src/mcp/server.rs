//! MCP tool server over stdio.
//!
//! Serves every tool of a [`ToolExecutorPort`] to external MCP clients.
//! Each call names (or inherits) a project root; the server keeps one
//! [`SessionState`] per root so a README written by one call is what a
//! later `review_readme` call reviews.
//!
//! ```text
//! stdin ──line──▶ handle_line ──▶ initialize | ping | tools/list | tools/call
//!                                                               │
//!                           RootResolver ─▶ SessionState ─▶ executor.execute
//! stdout ◀─line── JsonRpcResponse ◀──────────────────────────────┘
//! ```

use super::notes::NoteStore;
use super::protocol::{
    INVALID_REQUEST, IncomingMessage, JsonRpcResponse, METHOD_NOT_FOUND, MessageKind, PARSE_ERROR,
    RpcError, negotiate_version,
};
use super::runtime::RootResolver;
use crate::tools::JsonSchemaToolConverter;
use crew_application::ports::tool_executor::ToolExecutorPort;
use crew_application::ports::tool_schema::ToolSchemaPort;
use crew_domain::SessionState;
use crew_domain::tool::{
    builtin,
    entities::{ToolCall, ToolDefinition, ToolEffect},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "readme-crew-tools";

/// Extra argument accepted by every tool: the project root for the call.
const ROOT_ARG: &str = "project_root";
/// Extra `record_notes` argument: also save the note store to disk.
const PERSIST_ARG: &str = "persist";

pub struct McpToolServer {
    executor: Arc<dyn ToolExecutorPort>,
    roots: RootResolver,
    notes: NoteStore,
    sessions: HashMap<PathBuf, SessionState>,
}

impl McpToolServer {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, roots: RootResolver, notes: NoteStore) -> Self {
        Self {
            executor,
            roots,
            notes,
            sessions: HashMap::new(),
        }
    }

    /// Answer requests line by line until the client closes its end.
    pub async fn serve<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, tools = self.executor.tool_spec().len(), "MCP server ready on stdio");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let text = serde_json::to_string(&response).map_err(io::Error::other)?;
                writer.write_all(text.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        info!("MCP client disconnected");
        Ok(())
    }

    /// One frame in, at most one response out. Notifications get none.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let message: IncomingMessage = match serde_json::from_str(line) {
            Ok(m) => m,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        match message.kind() {
            MessageKind::Notification { method } => {
                debug!(method = %method, "MCP notification");
                None
            }
            MessageKind::Invalid { id } => Some(JsonRpcResponse::error(
                id,
                RpcError::new(INVALID_REQUEST, "Request has no method"),
            )),
            MessageKind::Request { id, method } => {
                let result = self.dispatch(&method, message.params).await;
                Some(JsonRpcResponse::from_result(id, result))
            }
        }
    }

    async fn dispatch(&mut self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize(params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tool_list()),
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    pub fn tool_list(&self) -> Value {
        let tools: Vec<Value> = self.executor.tool_spec().all().map(mcp_tool).collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&mut self, params: Option<Value>) -> Result<Value, RpcError> {
        let params = params.ok_or_else(|| RpcError::invalid_params("tools/call requires params"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;

        let mut call = ToolCall::new(name);
        match params.get("arguments") {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                call.arguments = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            }
            Some(_) => return Err(RpcError::invalid_params("'arguments' must be an object")),
        }

        let explicit_root = call.arguments.remove(ROOT_ARG);
        let persist = if name == builtin::RECORD_NOTES {
            let persist = call.get_bool(PERSIST_ARG).unwrap_or(true);
            call.arguments.remove(PERSIST_ARG);
            persist
        } else {
            false
        };
        let root = self.roots.resolve(explicit_root.as_ref().and_then(Value::as_str));

        let notes = &self.notes;
        let state = self
            .sessions
            .entry(root.clone())
            .or_insert_with(|| fresh_state(&root, notes));
        let result = self.executor.execute(&call, state).await;
        info!(tool = name, project_root = %root.display(), success = result.is_success(), "MCP tool call");

        if name == builtin::RECORD_NOTES && result.is_success() {
            for (title, text) in state.notes() {
                self.notes.record(title.clone(), text.clone(), &root);
            }
            if persist && let Err(e) = self.notes.persist() {
                warn!("Could not save notes to {}: {}", self.notes.path().display(), e);
            }
        }

        Ok(json!({
            "content": [{ "type": "text", "text": result.render_for_model() }],
            "isError": !result.is_success(),
        }))
    }
}

fn initialize(params: Option<&Value>) -> Value {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    json!({
        "protocolVersion": negotiate_version(requested),
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
    })
}

/// State for a root seen for the first time, seeded with its stored notes.
fn fresh_state(root: &Path, notes: &NoteStore) -> SessionState {
    let mut state = SessionState::new(root, "", root.join("README.md"));
    for (title, text) in notes.notes_for(root) {
        state.record_note(title, text);
    }
    state
}

/// MCP tool descriptor: the crew schema plus the server-level arguments.
fn mcp_tool(definition: &ToolDefinition) -> Value {
    let schema = JsonSchemaToolConverter.tool_to_schema(definition);
    let mut input_schema = schema
        .get("input_schema")
        .cloned()
        .unwrap_or_else(|| json!({ "type": "object", "properties": {} }));

    if let Some(properties) = input_schema.get_mut("properties").and_then(Value::as_object_mut) {
        properties.insert(
            ROOT_ARG.to_string(),
            json!({
                "type": "string",
                "description": "Project root for this call (defaults to the server's root)",
            }),
        );
        if definition.name == builtin::RECORD_NOTES {
            properties.insert(
                PERSIST_ARG.to_string(),
                json!({
                    "type": "boolean",
                    "description": "Also save the notes to disk (default: true)",
                }),
            );
        }
    }

    json!({
        "name": definition.name,
        "description": definition.description,
        "inputSchema": input_schema,
        "annotations": {
            "readOnlyHint": !definition.effect.mutates(),
            "destructiveHint": definition.effect == ToolEffect::FileWrite,
            "openWorldHint": definition.effect == ToolEffect::Network,
        },
    })
}
