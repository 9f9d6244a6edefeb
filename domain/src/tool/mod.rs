//! Tool domain module
//!
//! Tools are the only way an agent touches the outside world or the shared
//! session state. Every tool is described by a [`ToolDefinition`] (name,
//! parameters, effect), invoked through a [`ToolCall`], and produces a
//! [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Tool failures are data, not errors: a failed [`ToolResult`] is rendered
//! back into the agent's conversation so the agent can adapt.
//!
//! # Architecture
//!
//! - **Domain** (this module): definitions, names and validation, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for execution
//! - **Infrastructure** (`LocalToolExecutor`): file, network and model I/O

pub mod builtin;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
