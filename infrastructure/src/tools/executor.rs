//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! [`LocalToolExecutor`] bridges the application layer's abstract port with
//! the filesystem, the web search backends and the review oracle.
//!
//! # Execution Path
//!
//! ```text
//! ToolExecutorPort::execute(call, state)
//!   ├─ lookup definition   → NOT_FOUND if unregistered
//!   ├─ DefaultToolValidator → INVALID_ARGUMENT on bad arguments
//!   └─ dispatch by name
//!        ├─ file / directory / notes / readme  (synchronous, local)
//!        ├─ search_web                          (reqwest)
//!        └─ review_readme                       (LlmGateway)
//! ```

use async_trait::async_trait;
use crew_application::ports::llm_gateway::LlmGateway;
use crew_application::ports::tool_executor::ToolExecutorPort;
use crew_domain::SessionState;
use crew_domain::tool::{
    builtin,
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::{
    directory, file, notes, readme,
    review::{self, ReadmeCritic},
    web_search::{self, SearchSettings},
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Executor that runs the crew's tools on the local machine.
///
/// | Builder | Effect |
/// |---------|--------|
/// | [`new()`](Self::new) | All seven tools, DuckDuckGo search, no critic |
/// | [`with_search()`](Self::with_search) | Search backend and key |
/// | [`with_critic()`](Self::with_critic) | Oracle used by `review_readme` |
/// | [`with_tools()`](Self::with_tools) | Custom [`ToolSpec`] for tests |
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
    search: SearchSettings,
    critic: Option<ReadmeCritic>,
    http_client: reqwest::Client,
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

impl LocalToolExecutor {
    pub fn new() -> Self {
        Self::with_tools(super::default_tool_spec())
    }

    pub fn with_tools(tool_spec: ToolSpec) -> Self {
        Self {
            tool_spec,
            search: SearchSettings::default(),
            critic: None,
            http_client: http_client(),
        }
    }

    pub fn with_search(mut self, search: SearchSettings) -> Self {
        self.search = search;
        self
    }

    pub fn with_critic(mut self, gateway: Arc<dyn LlmGateway>, model: impl Into<String>) -> Self {
        self.critic = Some(ReadmeCritic::new(gateway, model));
        self
    }

    async fn dispatch(&self, call: &ToolCall, state: &mut SessionState) -> ToolResult {
        match call.tool_name.as_str() {
            builtin::GET_DIRECTORY_STRUCTURE => directory::execute_get_directory_structure(call, state),
            builtin::READ_FILE => file::execute_read_file(call, state),
            builtin::READ_FILE_CHUNK => file::execute_read_file_chunk(call, state),
            builtin::RECORD_NOTES => notes::execute_record_notes(call, state),
            builtin::WRITE_README => readme::execute_write_readme(call, state),
            builtin::SEARCH_WEB => {
                web_search::execute_search_web(&self.http_client, &self.search, call).await
            }
            builtin::REVIEW_README => {
                review::execute_review_readme(call, state, self.critic.as_ref()).await
            }
            _ => ToolResult::failure(
                &call.tool_name,
                ToolError::execution_failed(format!("Tool '{}' is not implemented", call.tool_name)),
            ),
        }
    }
}

impl Default for LocalToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall, state: &mut SessionState) -> ToolResult {
        let definition = match self.tool_spec.get(&call.tool_name) {
            Some(d) => d,
            None => return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name)),
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        let start = Instant::now();
        let result = self.dispatch(call, state).await;
        result.with_duration(start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn state_for(root: &std::path::Path) -> SessionState {
        SessionState::new(root, "", root.join("README.md"))
    }

    #[test]
    fn test_executor_has_all_tools() {
        let executor = LocalToolExecutor::new();
        for name in builtin::ALL {
            assert!(executor.has_tool(name), "missing {}", name);
        }
        assert_eq!(executor.available_tools().len(), builtin::ALL.len());
    }

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let executor = LocalToolExecutor::new();
        let mut state = state_for(std::path::Path::new("/work/demo"));

        let result = executor.execute(&ToolCall::new("run_command"), &mut state).await;

        assert!(!result.is_success());
        assert_eq!(result.render_for_model(), "[ERROR] Unknown tool: run_command");
    }

    #[tokio::test]
    async fn test_executor_validates_before_dispatch() {
        let dir = tempdir().unwrap();
        let executor = LocalToolExecutor::new();
        let mut state = state_for(dir.path());

        let call = ToolCall::new(builtin::WRITE_README)
            .with_arg("content", "# A")
            .with_arg("mode", "prepend");
        let result = executor.execute(&call, &mut state).await;

        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
        assert!(!dir.path().join("README.md").exists());
    }

    #[tokio::test]
    async fn test_executor_state_flows_between_calls() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "print('hi')").unwrap();
        let executor = LocalToolExecutor::new();
        let mut state = state_for(dir.path());

        let read = ToolCall::new(builtin::READ_FILE).with_arg("file_path", "main.py");
        let text = executor.execute(&read, &mut state).await;
        assert_eq!(text.output(), Some("print('hi')"));
        assert!(text.metadata.duration_ms.is_some());

        let note = ToolCall::new(builtin::RECORD_NOTES).with_arg("notes", "prints hi");
        executor.execute(&note, &mut state).await;

        let write = ToolCall::new(builtin::WRITE_README).with_arg("content", "# Hi");
        executor.execute(&write, &mut state).await;

        assert_eq!(state.notes()["project_overview"], "prints hi");
        assert_eq!(state.readme(), Some("# Hi"));
    }

    #[tokio::test]
    async fn test_requested_readme_target_is_never_read() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("GUIDE.md"), "stale docs").unwrap();
        let executor = LocalToolExecutor::new();
        let mut state = crew_application::SessionRequest::new(dir.path())
            .with_existing_readme("docs/../GUIDE.md")
            .fresh_state();

        let call = ToolCall::new(builtin::READ_FILE).with_arg("file_path", "GUIDE.md");
        let result = executor.execute(&call, &mut state).await;

        assert_eq!(result.output(), Some(file::README_SKIPPED));
    }

    #[tokio::test]
    async fn test_review_without_critic_fails_softly() {
        let executor = LocalToolExecutor::new();
        let mut state = state_for(std::path::Path::new("/work/demo"));
        state.set_readme("# Demo");

        let result = executor.execute(&ToolCall::new(builtin::REVIEW_README), &mut state).await;

        assert!(!result.is_success());
        assert!(state.feedback().is_none());
    }
}
