//! `get_directory_structure`: recursive project scan.
//!
//! Output is a nested JSON object per directory:
//!
//! ```json
//! {
//!   "path": "/work/demo",
//!   "dirs": [ { "path": "/work/demo/src", "dirs": [], "files": ["main.rs"], "file_paths": ["/work/demo/src/main.rs"] } ],
//!   "files": ["Cargo.toml"],
//!   "file_paths": ["/work/demo/Cargo.toml"]
//! }
//! ```
//!
//! Cache, VCS and build directories plus every hidden directory are skipped
//! at any depth. Entries are sorted by name so output is deterministic.

use super::path::resolve;
use crew_domain::SessionState;
use crew_domain::tool::{
    builtin::GET_DIRECTORY_STRUCTURE,
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".venv",
    "venv",
    "env",
    "build",
    "dist",
    "node_modules",
    ".git",
    ".github",
    "target",
];

pub fn get_directory_structure_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_DIRECTORY_STRUCTURE,
        "Recursively scan a directory and return its folder/file structure as JSON. \
         Cache, VCS and build folders (__pycache__, .git, .venv, node_modules, target, ...) \
         and hidden folders are skipped. Use this first to understand the project layout.",
        ToolEffect::ReadOnly,
    )
    .with_parameter(
        ToolParameter::new(
            "root_path",
            "Directory to scan; relative paths resolve against the project root. Defaults to the project root.",
            false,
        )
        .with_type("path"),
    )
}

#[derive(Debug, Serialize)]
pub struct DirectoryNode {
    pub path: String,
    pub dirs: Vec<DirectoryNode>,
    pub files: Vec<String>,
    pub file_paths: Vec<String>,
}

impl DirectoryNode {
    /// Every file path in this subtree.
    pub fn all_file_paths(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.file_paths.iter().map(String::as_str).collect();
        for dir in &self.dirs {
            out.extend(dir.all_file_paths());
        }
        out
    }
}

fn is_excluded_dir(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name)
}

/// Walk `dir` recursively.
pub fn scan(dir: &Path) -> io::Result<DirectoryNode> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());

    let mut node = DirectoryNode {
        path: dir.display().to_string(),
        dirs: Vec::new(),
        files: Vec::new(),
        file_paths: Vec::new(),
    };

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        // Symlinked directories are listed as files, never followed
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            if is_excluded_dir(&name) {
                continue;
            }
            // Unreadable subdirectories are skipped rather than failing the scan
            if let Ok(child) = scan(&path) {
                node.dirs.push(child);
            }
        } else {
            node.file_paths.push(path.display().to_string());
            node.files.push(name);
        }
    }

    Ok(node)
}

pub fn execute_get_directory_structure(call: &ToolCall, state: &SessionState) -> ToolResult {
    let raw = call.get_string("root_path").unwrap_or(".");
    let root = resolve(state.project_root(), raw);

    if !root.exists() {
        return ToolResult::failure(
            GET_DIRECTORY_STRUCTURE,
            ToolError::not_found(root.display().to_string()),
        );
    }
    if !root.is_dir() {
        return ToolResult::failure(
            GET_DIRECTORY_STRUCTURE,
            ToolError::invalid_argument(format!("'{}' is not a directory", root.display())),
        );
    }

    let tree = match scan(&root) {
        Ok(tree) => tree,
        Err(e) => {
            return ToolResult::failure(
                GET_DIRECTORY_STRUCTURE,
                ToolError::execution_failed(format!("Failed to scan {}: {}", root.display(), e)),
            );
        }
    };

    match serde_json::to_string_pretty(&tree) {
        Ok(json) => ToolResult::success(GET_DIRECTORY_STRUCTURE, json)
            .with_path(root.display().to_string()),
        Err(e) => ToolResult::failure(
            GET_DIRECTORY_STRUCTURE,
            ToolError::execution_failed(format!("Failed to serialize structure: {}", e)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn state_for(root: &Path) -> SessionState {
        SessionState::new(root, "", root.join("README.md"))
    }

    #[test]
    fn test_excluded_and_hidden_dirs_contribute_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for excluded in [".git/objects", "node_modules/left-pad", ".config/app"] {
            fs::create_dir_all(root.join(excluded)).unwrap();
        }
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join(".git/objects/ab"), "blob").unwrap();
        fs::write(root.join("node_modules/left-pad/index.js"), "x").unwrap();
        fs::write(root.join(".config/app/settings.toml"), "x").unwrap();
        fs::write(root.join("main.py"), "print('hi')").unwrap();

        let result = execute_get_directory_structure(&ToolCall::new(GET_DIRECTORY_STRUCTURE), &state_for(root));
        assert!(result.is_success());

        let tree: serde_json::Value = serde_json::from_str(result.output().unwrap()).unwrap();
        assert_eq!(tree["files"], serde_json::json!(["main.py"]));
        assert_eq!(tree["dirs"], serde_json::json!([]));

        let node = scan(root).unwrap();
        assert_eq!(node.all_file_paths().len(), 1);
        assert!(node.all_file_paths()[0].ends_with("main.py"));
    }

    #[test]
    fn test_nested_sorted_structure() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/bin")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/bin/cli.rs"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();
        fs::write(root.join(".env"), "SECRET=1").unwrap();

        let node = scan(root).unwrap();

        // Hidden files are listed; only hidden directories are skipped
        assert_eq!(node.files, vec![".env", "Cargo.toml"]);
        assert_eq!(node.dirs.len(), 1);
        let src = &node.dirs[0];
        assert!(src.path.ends_with("src"));
        assert_eq!(src.files, vec!["lib.rs"]);
        assert_eq!(src.dirs[0].files, vec!["cli.rs"]);
        assert!(src.file_paths[0].ends_with("src/lib.rs"));
    }

    #[test]
    fn test_relative_root_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/guide.md"), "").unwrap();

        let call = ToolCall::new(GET_DIRECTORY_STRUCTURE).with_arg("root_path", "docs");
        let result = execute_get_directory_structure(&call, &state_for(dir.path()));
        let tree: serde_json::Value = serde_json::from_str(result.output().unwrap()).unwrap();
        assert_eq!(tree["files"], serde_json::json!(["guide.md"]));
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let call = ToolCall::new(GET_DIRECTORY_STRUCTURE).with_arg("root_path", "nope");
        let result = execute_get_directory_structure(&call, &state_for(dir.path()));
        assert!(!result.is_success());
        assert!(result.render_for_model().starts_with("[ERROR] File not found:"));
    }
}
