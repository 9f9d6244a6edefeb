//! Domain layer for readme-crew
//!
//! This crate contains the core types and pure logic of the README crew.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Crew
//!
//! Four cooperating agents share one session and hand control to each other:
//!
//! - **ExplorerAgent** (root): scans the project and records notes
//! - **ResearcherAgent**: adds outside context via web search
//! - **WriterAgent**: writes the README from the notes
//! - **ReviewerAgent**: critiques the README and sends it back if needed
//!
//! ## Turn loop
//!
//! Each model output is classified as a final answer, a tool batch or a
//! handoff ([`AgentAction`]). The orchestrator advances a [`RunState`]
//! machine, charges every model call to a [`TurnBudget`] and reports what
//! happens as [`WorkflowEvent`]s.

pub mod agent;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod review;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{
    entities::AgentDefinition,
    model_config::{ModelBinding, SamplingOverrides, SamplingParams},
    roster::AgentRoster,
};
pub use core::error::DomainError;
pub use orchestration::{
    action::{ActionError, AgentAction, HANDOFF_TOOL, handoff_tool_definition},
    event::WorkflowEvent,
    state::{BudgetExhausted, RunState, TurnBudget},
};
pub use prompt::{AgentPromptTemplate, PromptTemplate};
pub use review::{ParsedReview, ReviewFeedback, SuggestedPatch};
pub use session::{
    entities::{Conversation, Message, Role},
    response::{ContentBlock, LlmResponse, StopReason},
    state::SessionState,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
