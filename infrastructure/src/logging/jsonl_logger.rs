//! JSONL file writer for workflow events.
//!
//! Each [`WorkflowEvent`] is serialized as a single JSON line carrying its
//! `type` tag plus a `timestamp`, appended to the file via a buffered writer.
//! Attempt boundaries are recorded as `attempt_start` / `attempt_end` lines.

use crew_application::ports::observer::WorkflowObserver;
use crew_domain::WorkflowEvent;
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// File name used inside the log directory.
pub const EVENTS_FILE: &str = "events.jsonl";

/// JSONL event logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after each line and on
/// `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Open `<log_dir>/events.jsonl` for appending.
    pub fn in_dir(log_dir: impl AsRef<Path>) -> Option<Self> {
        Self::new(log_dir.as_ref().join(EVENTS_FILE))
    }

    /// Open the given path for appending, creating parent directories.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create event log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, mut record: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        if let Value::Object(map) = &mut record {
            map.insert("timestamp".to_string(), Value::String(timestamp));
        }

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl WorkflowObserver for JsonlEventLogger {
    fn on_event(&self, event: &WorkflowEvent) {
        match serde_json::to_value(event) {
            Ok(record) => self.write_record(record),
            Err(e) => warn!("Could not serialize {} event: {}", event.kind(), e),
        }
    }

    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        self.write_record(json!({
            "type": "attempt_start",
            "attempt": attempt,
            "max_attempts": max_attempts,
        }));
    }

    fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
        self.write_record(json!({
            "type": "attempt_end",
            "attempt": attempt,
            "success": failure.is_none(),
            "failure": failure,
        }));
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_typed_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlEventLogger::in_dir(dir.path()).unwrap();

        logger.on_attempt_start(1, 3);
        logger.on_event(&WorkflowEvent::ToolInvoked {
            agent: "ExplorerAgent".into(),
            tool_name: "read_file".into(),
            arguments: json!({"file_path": "main.rs"}),
        });
        logger.on_attempt_end(1, None);
        let path = logger.path().to_path_buf();
        drop(logger);

        let records = lines(&path);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record["timestamp"].is_string());
        }
        assert_eq!(records[0]["type"], "attempt_start");
        assert_eq!(records[0]["max_attempts"], 3);
        assert_eq!(records[1]["type"], "tool_invoked");
        assert_eq!(records[1]["arguments"]["file_path"], "main.rs");
        assert_eq!(records[2]["success"], true);
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        for attempt in 1..=2 {
            let logger = JsonlEventLogger::in_dir(dir.path()).unwrap();
            logger.on_attempt_end(attempt, Some("empty output"));
        }

        let records = lines(&dir.path().join(EVENTS_FILE));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["attempt"], 2);
        assert_eq!(records[1]["failure"], "empty output");
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlEventLogger::in_dir(dir.path().join("nested/logs")).unwrap();
        assert!(logger.path().ends_with("nested/logs/events.jsonl"));
    }
}
