//! Notes recorded through the MCP server, kept across server restarts in
//! `<log_dir>/mcp_notes.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name used inside the log directory.
pub const NOTES_FILE: &str = "mcp_notes.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNote {
    pub notes: String,
    pub project_root: PathBuf,
}

/// Title → note map, one title per entry regardless of project.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredNote>,
}

impl NoteStore {
    /// Load `<log_dir>/mcp_notes.json`. A missing or malformed file starts
    /// an empty store.
    pub fn load(log_dir: impl AsRef<Path>) -> Self {
        let path = log_dir.as_ref().join(NOTES_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Ignoring malformed notes file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, title: impl Into<String>, notes: impl Into<String>, project_root: &Path) {
        self.entries.insert(
            title.into(),
            StoredNote {
                notes: notes.into(),
                project_root: project_root.to_path_buf(),
            },
        );
    }

    /// Notes recorded for `project_root`, by title.
    pub fn notes_for<'a>(&'a self, project_root: &'a Path) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .iter()
            .filter(move |(_, n)| n.project_root.as_path() == project_root)
            .map(|(title, n)| (title.as_str(), n.notes.as_str()))
    }

    pub fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.entries).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }
}
