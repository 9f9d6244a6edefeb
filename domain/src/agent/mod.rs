//! Agent domain
//!
//! An agent is a named, stateless-between-turns reasoning unit bound to a
//! model, a fixed tool subset, a system prompt and a set of peers it may
//! hand control to.
//!
//! - [`entities::AgentDefinition`]: immutable agent definition
//! - [`model_config::ModelBinding`]: model name + per-agent sampling
//! - [`roster::AgentRoster`]: validated registry and handoff graph

pub mod entities;
pub mod model_config;
pub mod roster;
