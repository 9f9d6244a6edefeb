//! Orchestration domain
//!
//! Pure building blocks of the turn loop:
//!
//! - [`action::AgentAction`]: how one model output is interpreted
//! - [`state::RunState`]: the orchestrator's state machine
//! - [`state::TurnBudget`]: bounded counter for dispatches and handoffs
//! - [`event::WorkflowEvent`]: the observable event stream

pub mod action;
pub mod event;
pub mod state;
