//! Application-level configuration.
//!
//! - [`ExecutionParams`]: turn, handoff and attempt budgets of a session

pub mod execution_params;

pub use execution_params::ExecutionParams;
