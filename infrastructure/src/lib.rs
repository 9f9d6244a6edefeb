//! Infrastructure layer for readme-crew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading and the
//! MCP tool server.

pub mod config;
pub mod logging;
pub mod mcp;
pub mod providers;
pub mod tools;


// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, ConfigValidationError, FileConfig, FileLlmConfig,
    FileLoggingConfig, FileSamplingConfig, FileSearchConfig, FileWorkflowConfig,
};
pub use logging::{JsonlEventLogger, TRANSCRIPT_TARGET, TracingEventLogger};
pub use mcp::{McpToolServer, NoteStore, RootResolver, RuntimeFile};
pub use providers::OpenAiCompatibleGateway;
pub use tools::{
    JsonSchemaToolConverter, LocalToolExecutor, ReadmeCritic, SearchProvider, SearchSettings,
    default_tool_spec,
};
