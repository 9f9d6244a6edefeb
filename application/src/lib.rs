//! Application layer for readme-crew
//!
//! This crate contains use cases, port definitions, and execution
//! parameters. It depends only on the domain layer.
//!
//! ```text
//! SessionRunner ──(attempt 1..=max_retries)──▶ WorkflowOrchestrator
//!                                                 │
//!                      ┌──────────────────────────┼─────────────────────┐
//!                      ▼                          ▼                     ▼
//!                 LlmGateway               ToolExecutorPort      WorkflowObserver
//! ```

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    observer::{CompositeObserver, NoObserver, WorkflowObserver},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::orchestrator::{RunOutput, WorkflowError, WorkflowOrchestrator};
pub use use_cases::session_runner::{
    SESSION_EXHAUSTED_MESSAGE, SessionOutcome, SessionRequest, SessionRunner,
};
