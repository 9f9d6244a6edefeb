//! Workflow budgets from TOML (`[workflow]` section)

use crew_application::ExecutionParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Model invocations allowed per attempt
    pub max_iterations: u32,
    /// Whole-session attempts
    pub max_retries: u32,
    /// Optional cap on handoffs per attempt
    pub max_handoffs: Option<u32>,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_iterations: params.max_iterations,
            max_retries: params.max_retries,
            max_handoffs: params.max_handoffs,
        }
    }
}

impl FileWorkflowConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams {
            max_iterations: self.max_iterations,
            max_retries: self.max_retries,
            max_handoffs: self.max_handoffs,
        }
    }
}
