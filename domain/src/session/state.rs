//! Shared session state.
//!
//! One [`SessionState`] exists per attempt. It is owned by the caller of the
//! orchestrator and passed by `&mut` through the turn loop, so every tool
//! call observes the mutations of every earlier call. The single-active-agent
//! turn model serializes all writes; no lock is involved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default title used when a note is recorded without one.
pub const DEFAULT_NOTES_TITLE: &str = "project_overview";

/// The mutable record shared by every agent turn of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    project_root: PathBuf,
    existing_readme_path: PathBuf,
    user_requirements: String,
    notes: BTreeMap<String, String>,
    readme: Option<String>,
    feedback: Option<String>,
}

impl SessionState {
    /// Build fresh state for one attempt.
    ///
    /// Paths are expected to be absolute already; the session runner
    /// resolves them before constructing state.
    pub fn new(
        project_root: impl Into<PathBuf>,
        user_requirements: impl Into<String>,
        existing_readme_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            existing_readme_path: existing_readme_path.into(),
            user_requirements: user_requirements.into(),
            notes: BTreeMap::new(),
            readme: None,
            feedback: None,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn existing_readme_path(&self) -> &Path {
        &self.existing_readme_path
    }

    pub fn user_requirements(&self) -> &str {
        &self.user_requirements
    }

    pub fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    pub fn readme(&self) -> Option<&str> {
        self.readme.as_deref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Insert or overwrite the note stored under `title`.
    ///
    /// Returns `true` if an earlier note with the same title was replaced.
    pub fn record_note(&mut self, title: impl Into<String>, text: impl Into<String>) -> bool {
        self.notes.insert(title.into(), text.into()).is_some()
    }

    pub fn set_readme(&mut self, content: impl Into<String>) {
        self.readme = Some(content.into());
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = Some(feedback.into());
    }

    /// Notes as a JSON object, the shape handed to the review critique.
    pub fn notes_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.notes).unwrap_or(serde_json::Value::Null)
    }

    /// Textual snapshot appended to an agent's system prompt on every model
    /// call, so each turn sees the latest mutations.
    pub fn render_for_prompt(&self) -> String {
        let mut out = String::from("## Current session state\n");
        out.push_str(&format!("- project_root: {}\n", self.project_root.display()));
        out.push_str(&format!(
            "- existing_readme_path: {}\n",
            self.existing_readme_path.display()
        ));
        let requirements = if self.user_requirements.trim().is_empty() {
            "(none)"
        } else {
            self.user_requirements.as_str()
        };
        out.push_str(&format!("- user_requirements: {}\n", requirements));

        if self.notes.is_empty() {
            out.push_str("\n### Notes\n(none recorded yet)\n");
        } else {
            out.push_str("\n### Notes\n");
            for (title, text) in &self.notes {
                out.push_str(&format!("#### {}\n{}\n\n", title, text.trim_end()));
            }
        }

        match &self.readme {
            Some(readme) => {
                out.push_str("\n### Current README draft\n");
                out.push_str(readme.trim_end());
                out.push('\n');
            }
            None => out.push_str("\n### Current README draft\n(not written yet)\n"),
        }

        if let Some(feedback) = &self.feedback {
            out.push_str("\n### Latest review feedback\n");
            out.push_str(feedback.trim_end());
            out.push('\n');
        }

        out
    }
}
