//! MCP tool server
//!
//! Exposes the crew's tools to external MCP clients over stdio, so an
//! editor or another agent runtime can scan, read, note, search, write and
//! review with the same implementations the crew uses.
//!
//! - [`protocol`]: JSON-RPC 2.0 frames and error codes
//! - [`runtime`]: project-root handoff through `mcp_runtime.json`
//! - [`notes`]: notes saved to `mcp_notes.json`
//! - [`server::McpToolServer`]: request dispatch and the stdio loop

pub mod notes;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use notes::NoteStore;
pub use runtime::{PROJECT_ROOT_ENV, RootResolver, RuntimeFile};
pub use server::McpToolServer;
