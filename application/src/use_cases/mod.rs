//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod orchestrator;
pub mod session_runner;

#[cfg(test)]
pub(crate) mod test_support;
