//! File reading tools: `read_file` and `read_file_chunk`.
//!
//! Both tools refuse to read the README being generated so the Explorer's
//! notes are built from the code, not from stale documentation.

use super::path::resolve;
use crew_domain::SessionState;
use crew_domain::tool::{
    builtin::{READ_FILE, READ_FILE_CHUNK},
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use crew_domain::util::{char_window, normalize_path};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Default character cap for a single read.
pub const DEFAULT_MAX_CHARS: usize = 8000;

/// Marker appended when `read_file` cuts a file short.
pub const TRUNCATED_MARKER: &str = "\n\n[TRUNCATED]";

/// Returned instead of README contents.
pub const README_SKIPPED: &str = "[SKIPPED] README.md is excluded from ExplorerAgent file reading.";

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the text of a source or config file. README.md files are skipped. \
         Output longer than max_chars is cut and ends with [TRUNCATED]; use read_file_chunk for the rest.",
        ToolEffect::ReadOnly,
    )
    .with_parameter(
        ToolParameter::new("file_path", "Path to the file; relative paths resolve against the project root", true)
            .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("max_chars", "Maximum characters to return (default: 8000)", false)
            .with_type("integer"),
    )
}

pub fn read_file_chunk_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE_CHUNK,
        "Read a window of a large file. Returns JSON {content, next_offset, has_more, total_length}; \
         call again with offset = next_offset while has_more is true.",
        ToolEffect::ReadOnly,
    )
    .with_parameter(
        ToolParameter::new("file_path", "Path to the file; relative paths resolve against the project root", true)
            .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("offset", "Character offset to start from (default: 0)", false)
            .with_type("integer"),
    )
    .with_parameter(
        ToolParameter::new("max_chars", "Maximum characters to return (default: 8000)", false)
            .with_type("integer"),
    )
}

#[derive(Debug, Serialize)]
struct Chunk<'a> {
    content: &'a str,
    next_offset: Option<usize>,
    has_more: bool,
    total_length: usize,
}

/// Whether `path` is a README the Explorer must not read.
fn is_readme(path: &Path, state: &SessionState) -> bool {
    let named_readme = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case("README.md"));
    named_readme || normalize_path(path) == normalize_path(state.existing_readme_path())
}

fn usize_arg(call: &ToolCall, key: &str, default: usize) -> Result<usize, ToolError> {
    match call.get_i64(key) {
        None => Ok(default),
        Some(n) if n < 0 => Err(ToolError::invalid_argument(format!(
            "'{}' must not be negative (got {})",
            key, n
        ))),
        Some(n) => Ok(n as usize),
    }
}

/// Read the whole file as text. Invalid UTF-8 sequences are replaced.
fn load(path: &Path, tool: &str) -> Result<String, ToolResult> {
    if !path.exists() {
        return Err(ToolResult::failure(tool, ToolError::not_found(path.display().to_string())));
    }
    if !path.is_file() {
        return Err(ToolResult::failure(
            tool,
            ToolError::invalid_argument(format!("'{}' is not a file", path.display())),
        ));
    }
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|e| {
            ToolResult::failure(
                tool,
                ToolError::execution_failed(format!("Failed to read {}: {}", path.display(), e)),
            )
        })
}

pub fn execute_read_file(call: &ToolCall, state: &SessionState) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ_FILE, ToolError::invalid_argument(e)),
    };
    let max_chars = match usize_arg(call, "max_chars", DEFAULT_MAX_CHARS) {
        Ok(n) => n,
        Err(e) => return ToolResult::failure(READ_FILE, e),
    };

    let path = resolve(state.project_root(), raw);
    if is_readme(&path, state) {
        return ToolResult::success(READ_FILE, README_SKIPPED).with_path(path.display().to_string());
    }

    let text = match load(&path, READ_FILE) {
        Ok(text) => text,
        Err(result) => return result,
    };

    let total = text.chars().count();
    let output = if total > max_chars {
        format!("{}{}", char_window(&text, 0, max_chars), TRUNCATED_MARKER)
    } else {
        text
    };

    ToolResult::success(READ_FILE, output).with_path(path.display().to_string())
}

pub fn execute_read_file_chunk(call: &ToolCall, state: &SessionState) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ_FILE_CHUNK, ToolError::invalid_argument(e)),
    };
    let (offset, max_chars) = match (
        usize_arg(call, "offset", 0),
        usize_arg(call, "max_chars", DEFAULT_MAX_CHARS),
    ) {
        (Ok(o), Ok(m)) => (o, m),
        (Err(e), _) | (_, Err(e)) => return ToolResult::failure(READ_FILE_CHUNK, e),
    };

    let path = resolve(state.project_root(), raw);
    if is_readme(&path, state) {
        return ToolResult::success(READ_FILE_CHUNK, README_SKIPPED)
            .with_path(path.display().to_string());
    }

    let text = match load(&path, READ_FILE_CHUNK) {
        Ok(text) => text,
        Err(result) => return result,
    };

    let total_length = text.chars().count();
    let content = char_window(&text, offset, max_chars);
    let end = offset.saturating_add(content.chars().count());
    let has_more = end < total_length;
    let chunk = Chunk {
        content,
        next_offset: has_more.then_some(end),
        has_more,
        total_length,
    };

    match serde_json::to_string(&chunk) {
        Ok(json) => ToolResult::success(READ_FILE_CHUNK, json).with_path(path.display().to_string()),
        Err(e) => ToolResult::failure(
            READ_FILE_CHUNK,
            ToolError::execution_failed(format!("Failed to serialize chunk: {}", e)),
        ),
    }
}
