//! Orchestrator run states and budgets.
//!
//! ```text
//! Dispatch(a) ──▶ AwaitingModel(a) ──┬─▶ ExecutingTools(a, calls) ──▶ Dispatch(a)
//!                                    ├─▶ HandoffPending(a, b) ──────▶ Dispatch(b)
//!                                    └─▶ Terminal(answer)
//! any non-absorbing state ──▶ Aborted(reason)
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// State of one orchestrator run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Dispatch {
        agent: String,
    },
    AwaitingModel {
        agent: String,
    },
    ExecutingTools {
        agent: String,
        calls: Vec<ToolCall>,
    },
    HandoffPending {
        from: String,
        to: String,
    },
    Terminal {
        answer: String,
    },
    Aborted {
        reason: String,
    },
}

impl RunState {
    pub fn dispatch(agent: impl Into<String>) -> Self {
        RunState::Dispatch {
            agent: agent.into(),
        }
    }

    /// `Terminal` and `Aborted` admit no further transitions.
    pub fn is_absorbing(&self) -> bool {
        matches!(self, RunState::Terminal { .. } | RunState::Aborted { .. })
    }

    /// The agent in control, if any.
    pub fn agent(&self) -> Option<&str> {
        match self {
            RunState::Dispatch { agent }
            | RunState::AwaitingModel { agent }
            | RunState::ExecutingTools { agent, .. } => Some(agent),
            RunState::HandoffPending { from, .. } => Some(from),
            RunState::Terminal { .. } | RunState::Aborted { .. } => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Dispatch { .. } => "dispatch",
            RunState::AwaitingModel { .. } => "awaiting_model",
            RunState::ExecutingTools { .. } => "executing_tools",
            RunState::HandoffPending { .. } => "handoff_pending",
            RunState::Terminal { .. } => "terminal",
            RunState::Aborted { .. } => "aborted",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Dispatch { agent } => write!(f, "Dispatch({})", agent),
            RunState::AwaitingModel { agent } => write!(f, "AwaitingModel({})", agent),
            RunState::ExecutingTools { agent, calls } => {
                write!(f, "ExecutingTools({}, {} calls)", agent, calls.len())
            }
            RunState::HandoffPending { from, to } => write!(f, "HandoffPending({} -> {})", from, to),
            RunState::Terminal { .. } => write!(f, "Terminal"),
            RunState::Aborted { reason } => write!(f, "Aborted({})", reason),
        }
    }
}

/// A budget was used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("budget of {max} exhausted")]
pub struct BudgetExhausted {
    pub max: u32,
}

/// Bounded, strictly increasing counter.
///
/// Used for the per-run turn budget (one unit per model invocation) and the
/// optional handoff cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBudget {
    max: u32,
    used: u32,
}

impl TurnBudget {
    pub fn new(max: u32) -> Self {
        Self { max, used: 0 }
    }

    /// Take one unit. Returns the 1-based ordinal of the unit taken, or an
    /// error once `used` would exceed `max`.
    pub fn consume(&mut self) -> Result<u32, BudgetExhausted> {
        if self.is_exhausted() {
            return Err(BudgetExhausted { max: self.max });
        }
        self.used += 1;
        Ok(self.used)
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }
}
