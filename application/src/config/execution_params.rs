//! Execution parameters: orchestrator and session runner loop control.
//!
//! [`ExecutionParams`] groups the static budgets that bound a session.
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Loop control parameters.
///
/// | Field | Bounds | Used by |
/// |-------|--------|---------|
/// | `max_iterations` | model invocations per attempt | `WorkflowOrchestrator` |
/// | `max_handoffs` | handoffs per attempt (optional) | `WorkflowOrchestrator` |
/// | `max_retries` | attempts per session | `SessionRunner` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of agent dispatches in one attempt.
    pub max_iterations: u32,
    /// Maximum number of whole-session attempts.
    pub max_retries: u32,
    /// Optional cap on handoffs, independent of the turn budget.
    pub max_handoffs: Option<u32>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            max_retries: 3,
            max_handoffs: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_max_handoffs(mut self, max: Option<u32>) -> Self {
        self.max_handoffs = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_iterations, 50);
        assert_eq!(params.max_retries, 3);
        assert!(params.max_handoffs.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_iterations(10)
            .with_max_retries(1)
            .with_max_handoffs(Some(4));

        assert_eq!(params.max_iterations, 10);
        assert_eq!(params.max_retries, 1);
        assert_eq!(params.max_handoffs, Some(4));
    }
}
