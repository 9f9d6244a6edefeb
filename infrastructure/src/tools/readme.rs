//! `write_readme`: write or append the generated README.

use super::path::{is_contained, resolve};
use crew_domain::SessionState;
use crew_domain::tool::{
    builtin::WRITE_README,
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_README_PATH: &str = "README.md";

/// How `write_readme` treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

impl WriteMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Some(WriteMode::Overwrite),
            "append" => Some(WriteMode::Append),
            _ => None,
        }
    }
}

pub fn write_readme_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_README,
        "Write the README in Markdown. mode=overwrite replaces the file, \
         mode=append adds the content after the existing text separated by a blank line.",
        ToolEffect::FileWrite,
    )
    .with_parameter(ToolParameter::new("content", "Full Markdown content to write", true))
    .with_parameter(
        ToolParameter::new(
            "relative_path",
            "Target path relative to the project root (default: README.md)",
            false,
        )
        .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("mode", "overwrite (default) or append", false)
            .with_allowed_values(["overwrite", "append"]),
    )
}

/// Text the file will hold after an append.
fn appended(existing: &str, content: &str) -> String {
    if existing.trim().is_empty() {
        content.to_string()
    } else {
        format!("{}\n\n{}", existing.trim_end(), content.trim_start())
    }
}

fn write(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}

pub fn execute_write_readme(call: &ToolCall, state: &mut SessionState) -> ToolResult {
    let content = match call.require_string("content") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(WRITE_README, ToolError::invalid_argument(e)),
    };
    let mode = match call.get_string("mode") {
        None => WriteMode::Overwrite,
        Some(m) => match WriteMode::parse(m) {
            Some(mode) => mode,
            None => {
                return ToolResult::failure(
                    WRITE_README,
                    ToolError::invalid_argument(format!(
                        "Invalid mode '{}': expected 'overwrite' or 'append'",
                        m
                    )),
                );
            }
        },
    };

    let raw = call
        .get_string("relative_path")
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(DEFAULT_README_PATH);
    let path = resolve(state.project_root(), raw);
    if !is_contained(state.project_root(), &path) {
        return ToolResult::failure(
            WRITE_README,
            ToolError::permission_denied(format!("{} is outside the project root", path.display())),
        );
    }

    let text = match mode {
        WriteMode::Overwrite => content.to_string(),
        WriteMode::Append => {
            let existing = fs::read_to_string(&path).unwrap_or_default();
            appended(&existing, content)
        }
    };

    if let Err(e) = write(&path, &text) {
        return ToolResult::failure(
            WRITE_README,
            ToolError::execution_failed(format!("Failed to write {}: {}", path.display(), e)),
        );
    }

    info!(path = %path.display(), ?mode, chars = text.chars().count(), "README written");
    state.set_readme(text);

    ToolResult::success(
        WRITE_README,
        format!("README successfully written to: {}", path.display()),
    )
    .with_path(path.display().to_string())
}
