//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a tool touches when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolEffect {
    /// Local read-only I/O (directory scan, file read)
    ReadOnly,
    /// Calls an external service (web search, model oracle)
    Network,
    /// Mutates the shared session state only
    SessionState,
    /// Writes to the filesystem (and the session state)
    FileWrite,
}

impl ToolEffect {
    pub fn as_str(&self) -> &str {
        match self {
            ToolEffect::ReadOnly => "read_only",
            ToolEffect::Network => "network",
            ToolEffect::SessionState => "session_state",
            ToolEffect::FileWrite => "file_write",
        }
    }

    /// Whether running the tool changes state visible to later turns.
    pub fn mutates(&self) -> bool {
        matches!(self, ToolEffect::SessionState | ToolEffect::FileWrite)
    }
}

impl std::fmt::Display for ToolEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool that can be offered to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "read_file")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// What the tool touches
    pub effect: ToolEffect,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "path", "integer", "object")
    pub param_type: String,
    /// Allowed values, if the parameter is an enumeration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, effect: ToolEffect) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            effect,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            allowed_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered registry of tool definitions.
///
/// Registration order is preserved so schemas offered to a model are stable.
/// Re-registering a name replaces the earlier definition in place.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Provider-assigned call ID, used to correlate the result message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a provider tool-use block.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_native_id(mut self, id: impl Into<String>) -> Self {
        self.native_id = Some(id.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional integer argument.
    ///
    /// Models sometimes send numbers as strings; those are accepted too.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.arguments.get(key)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// Arguments as a JSON object, for logging and events.
    pub fn arguments_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .arguments
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_effect() {
        assert!(!ToolEffect::ReadOnly.mutates());
        assert!(!ToolEffect::Network.mutates());
        assert!(ToolEffect::SessionState.mutates());
        assert!(ToolEffect::FileWrite.mutates());
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("read_file", "Read file contents", ToolEffect::ReadOnly)
            .with_parameter(
                ToolParameter::new("file_path", "File path to read", true).with_type("path"),
            );

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.parameters[0].name, "file_path");
    }

    #[test]
    fn test_tool_spec_preserves_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("b_tool", "B", ToolEffect::ReadOnly))
            .register(ToolDefinition::new("a_tool", "A", ToolEffect::Network))
            .register(ToolDefinition::new("b_tool", "B again", ToolEffect::ReadOnly));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["b_tool", "a_tool"]);
        assert_eq!(spec.get("b_tool").unwrap().description, "B again");
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("read_file")
            .with_arg("file_path", "/test/file.txt")
            .with_arg("max_chars", "120");

        assert_eq!(call.tool_name, "read_file");
        assert_eq!(call.get_string("file_path"), Some("/test/file.txt"));
        assert_eq!(call.require_string("file_path").unwrap(), "/test/file.txt");
        assert!(call.require_string("missing").is_err());
        assert_eq!(call.get_i64("max_chars"), Some(120));
    }

    #[test]
    fn test_from_native_sets_id() {
        let call = ToolCall::from_native("call_1", "record_notes", HashMap::new());
        assert_eq!(call.native_id.as_deref(), Some("call_1"));
        assert_eq!(call.arguments_json(), serde_json::json!({}));
    }
}
