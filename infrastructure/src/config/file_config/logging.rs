//! Log file configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily session log and `events.jsonl`
    pub dir: PathBuf,
    /// Also write every workflow event as JSON Lines
    pub jsonl: bool,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            jsonl: false,
        }
    }
}
