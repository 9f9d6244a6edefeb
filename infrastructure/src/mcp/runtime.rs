//! Runtime handoff between a crew session and the MCP tool server.
//!
//! A session records its project root in `<log_dir>/mcp_runtime.json`; a
//! server started without an explicit root picks it up from there.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name used inside the log directory.
pub const RUNTIME_FILE: &str = "mcp_runtime.json";

/// Environment variable naming the project root for the tool server.
pub const PROJECT_ROOT_ENV: &str = "README_CREW_PROJECT_ROOT";

/// JSON object of runtime entries shared through the log directory.
#[derive(Debug, Clone)]
pub struct RuntimeFile {
    path: PathBuf,
}

impl RuntimeFile {
    pub fn in_dir(log_dir: impl AsRef<Path>) -> Self {
        Self {
            path: log_dir.as_ref().join(RUNTIME_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries. A missing or unreadable file reads as empty.
    pub fn read(&self) -> Map<String, Value> {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => map,
            _ => {
                warn!("Ignoring malformed runtime file {}", self.path.display());
                Map::new()
            }
        }
    }

    /// Merge `entries` into the file, keeping keys it does not mention.
    pub fn update(&self, entries: Map<String, Value>) -> io::Result<()> {
        let mut current = self.read();
        current.extend(entries);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(current)).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }

    pub fn record_project_root(&self, root: &Path) -> io::Result<()> {
        let mut entries = Map::new();
        entries.insert(
            "project_root".to_string(),
            Value::String(root.display().to_string()),
        );
        self.update(entries)
    }

    pub fn project_root(&self) -> Option<PathBuf> {
        self.read()
            .get("project_root")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// Project-root lookup for tool calls. First match wins:
///
/// 1. `project_root` argument of the call
/// 2. root fixed when the server started (`--path`)
/// 3. [`PROJECT_ROOT_ENV`]
/// 4. runtime file, re-read on every call
/// 5. current directory
#[derive(Debug, Clone)]
pub struct RootResolver {
    fixed: Option<PathBuf>,
    env: Option<String>,
    runtime: RuntimeFile,
}

impl RootResolver {
    pub fn new(fixed: Option<PathBuf>, runtime: RuntimeFile) -> Self {
        Self {
            fixed,
            env: std::env::var(PROJECT_ROOT_ENV).ok(),
            runtime,
        }
    }

    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }

    pub fn resolve(&self, explicit: Option<&str>) -> PathBuf {
        let chosen = explicit
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.fixed.clone())
            .or_else(|| {
                self.env
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| self.runtime.project_root())
            .unwrap_or_else(|| PathBuf::from("."));
        std::path::absolute(&chosen).unwrap_or(chosen)
    }
}
