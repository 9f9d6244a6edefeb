//! Session domain.
//!
//! - [`state::SessionState`]: the shared mutable record of one run
//! - [`entities::Message`]: a single message of the shared conversation
//! - [`response::LlmResponse`]: structured model output (text + tool use)

pub mod entities;
pub mod response;
pub mod state;
