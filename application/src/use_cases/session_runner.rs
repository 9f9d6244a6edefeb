//! Session runner use case.
//!
//! Supervises whole-session attempts: each attempt builds fresh
//! [`SessionState`], runs the orchestrator to an absorbing state and
//! validates the answer. A failed attempt's state (notes included) is
//! dropped before the next attempt starts. When every attempt fails the
//! caller still receives a string, [`SESSION_EXHAUSTED_MESSAGE`].

use crate::config::ExecutionParams;
use crate::use_cases::orchestrator::{RunOutput, WorkflowOrchestrator};
use crew_domain::SessionState;
use crew_domain::util::normalize_path;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Returned to the caller when every attempt failed.
pub const SESSION_EXHAUSTED_MESSAGE: &str =
    "README generation failed: every attempt ended without a usable answer. See the session log for details.";

/// Caller-supplied parameters of one session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub project_root: PathBuf,
    pub user_requirements: String,
    /// Existing README location; defaults to `README.md` in the project root.
    pub existing_readme_path: Option<PathBuf>,
}

impl SessionRequest {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            user_requirements: String::new(),
            existing_readme_path: None,
        }
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.user_requirements = requirements.into();
        self
    }

    pub fn with_existing_readme(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing_readme_path = Some(path.into());
        self
    }

    /// Absolute project root. Relative roots resolve against the current
    /// directory.
    pub fn resolved_root(&self) -> PathBuf {
        absolute(&self.project_root)
    }

    /// Absolute, lexically normalized README path. Relative paths resolve
    /// against the project root.
    pub fn resolved_readme_path(&self) -> PathBuf {
        let root = self.resolved_root();
        let path = match &self.existing_readme_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join("README.md"),
        };
        normalize_path(&path)
    }

    /// Fresh state for one attempt.
    pub fn fresh_state(&self) -> SessionState {
        SessionState::new(
            self.resolved_root(),
            self.user_requirements.clone(),
            self.resolved_readme_path(),
        )
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// What the caller gets back from [`SessionRunner::run`].
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Final answer, or [`SESSION_EXHAUSTED_MESSAGE`].
    pub text: String,
    /// Attempts made, including the successful one.
    pub attempts: u32,
    pub succeeded: bool,
    /// State of the successful attempt. Failed attempts keep nothing.
    pub state: Option<SessionState>,
    /// Failure reason of each failed attempt, in order.
    pub failures: Vec<String>,
    /// Turn count of the successful attempt.
    pub turns: Option<u32>,
}

/// Use case wrapping the orchestrator with validation and bounded retry.
pub struct SessionRunner {
    orchestrator: WorkflowOrchestrator,
    params: ExecutionParams,
}

impl SessionRunner {
    pub fn new(orchestrator: WorkflowOrchestrator, params: ExecutionParams) -> Self {
        Self {
            orchestrator,
            params,
        }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Run up to `max_retries` attempts. Never fails.
    pub async fn run(&self, request: &SessionRequest) -> SessionOutcome {
        let observer = self.orchestrator.observer().clone();
        let max_attempts = self.params.max_retries;
        let mut failures = Vec::new();

        for attempt in 1..=max_attempts {
            observer.on_attempt_start(attempt, max_attempts);
            let mut state = request.fresh_state();
            info!(
                attempt,
                max_attempts,
                project_root = %state.project_root().display(),
                "Starting session attempt"
            );

            let failure = match self.orchestrator.run(&mut state, &self.params).await {
                Ok(output) => match validate(&output) {
                    Ok(()) => {
                        info!(attempt, turns = output.turns, "Session attempt succeeded");
                        observer.on_attempt_end(attempt, None);
                        return SessionOutcome {
                            text: output.answer,
                            attempts: attempt,
                            succeeded: true,
                            state: Some(state),
                            failures,
                            turns: Some(output.turns),
                        };
                    }
                    Err(reason) => reason,
                },
                Err(e) => e.to_string(),
            };

            warn!(attempt, max_attempts, "Session attempt failed: {}", failure);
            observer.on_attempt_end(attempt, Some(&failure));
            failures.push(failure);
            // `state` is dropped here; the next attempt starts from scratch
        }

        warn!(
            attempts = max_attempts,
            "All session attempts failed; returning fallback message"
        );
        SessionOutcome {
            text: SESSION_EXHAUSTED_MESSAGE.to_string(),
            attempts: max_attempts,
            succeeded: false,
            state: None,
            failures,
            turns: None,
        }
    }
}

/// A terminal answer must be non-empty after trimming.
fn validate(output: &RunOutput) -> Result<(), String> {
    if output.answer.trim().is_empty() {
        return Err(format!(
            "Agent '{}' returned an empty final answer",
            output.final_agent
        ));
    }
    Ok(())
}
