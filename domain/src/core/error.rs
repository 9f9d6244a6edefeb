//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised while assembling the agent roster, before any run
/// starts. Run-time failures live in the application layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents registered")]
    NoAgents,

    #[error("Duplicate agent name: {0}")]
    DuplicateAgent(String),

    #[error("Root agent '{0}' is not registered")]
    UnknownRootAgent(String),

    #[error("Agent '{from}' declares handoff target '{to}' which is not registered")]
    DanglingHandoff { from: String, to: String },
}
