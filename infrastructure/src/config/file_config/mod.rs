//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to defaults.

mod llm;
mod logging;
mod sampling;
mod search;
mod workflow;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use sampling::FileSamplingConfig;
pub use search::FileSearchConfig;
pub use workflow::FileWorkflowConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("workflow.max_iterations cannot be 0")]
    ZeroMaxIterations,

    #[error("workflow.max_retries cannot be 0")]
    ZeroMaxRetries,

    #[error("search.max_results cannot be 0")]
    ZeroMaxResults,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint settings
    pub llm: FileLlmConfig,
    /// Global sampling overrides applied to every agent
    pub sampling: FileSamplingConfig,
    /// Turn and retry budgets
    pub workflow: FileWorkflowConfig,
    /// Web search backend
    pub search: FileSearchConfig,
    /// Log files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.workflow.max_iterations == 0 {
            return Err(ConfigValidationError::ZeroMaxIterations);
        }
        if self.workflow.max_retries == 0 {
            return Err(ConfigValidationError::ZeroMaxRetries);
        }
        if self.search.max_results == 0 {
            return Err(ConfigValidationError::ZeroMaxResults);
        }
        Ok(())
    }
}
