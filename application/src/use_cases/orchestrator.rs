//! Workflow orchestrator use case.
//!
//! Drives one attempt of the multi-agent turn loop:
//!
//! ```text
//! Dispatch(root)
//!   │  consume one turn
//!   ▼
//! AwaitingModel(a) ── model output ──┬─ final text ───────────▶ Terminal(answer)
//!                                    ├─ tool calls ───────────▶ ExecutingTools(a) ──▶ Dispatch(a)
//!                                    └─ [tool calls +] handoff ▶ ExecutingTools(a) ──▶ HandoffPending(a, b) ──▶ Dispatch(b)
//! ```
//!
//! Every model invocation is charged to the turn budget, so neither tool
//! loops nor handoff cycles can outlive `max_iterations`. Any protocol or
//! model failure moves the run to `Aborted` and is returned as a
//! [`WorkflowError`]; tool failures are fed back to the agent as text.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::observer::{NoObserver, WorkflowObserver};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crew_domain::util::preview;
use crew_domain::{
    ActionError, AgentAction, AgentDefinition, AgentRoster, Conversation, Message,
    PromptTemplate, RunState, SessionState, ToolCall, TurnBudget, WorkflowEvent,
    handoff_tool_definition,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort one attempt.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Agent '{agent}' performed an invalid action: {detail}")]
    InvalidAgentAction { agent: String, detail: String },

    #[error("Agent '{agent}' produced no usable output")]
    EmptyModelOutput { agent: String },

    #[error("Turn budget exceeded (max_iterations = {max_iterations})")]
    TurnBudgetExceeded { max_iterations: u32 },

    #[error("Handoff budget exceeded (max_handoffs = {max_handoffs})")]
    HandoffBudgetExceeded { max_handoffs: u32 },

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl WorkflowError {
    fn invalid(agent: &str, detail: impl Into<String>) -> Self {
        WorkflowError::InvalidAgentAction {
            agent: agent.to_string(),
            detail: detail.into(),
        }
    }

    /// Short machine-readable label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::InvalidAgentAction { .. } => "invalid_agent_action",
            WorkflowError::EmptyModelOutput { .. } => "empty_model_output",
            WorkflowError::TurnBudgetExceeded { .. } => "turn_budget_exceeded",
            WorkflowError::HandoffBudgetExceeded { .. } => "handoff_budget_exceeded",
            WorkflowError::UnknownAgent(_) => "unknown_agent",
            WorkflowError::Gateway(_) => "gateway",
        }
    }
}

/// Result of a run that reached `Terminal`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub answer: String,
    /// Agent that produced the final answer.
    pub final_agent: String,
    /// Model invocations used.
    pub turns: u32,
    pub handoffs: u32,
    pub conversation: Conversation,
}

/// A handoff waiting for its agent's preceding tool calls to finish.
struct PendingHandoff {
    to: String,
    reason: Option<String>,
    call_id: String,
}

/// Mutable bookkeeping of one run, separate from the shared session state.
struct RunContext {
    conversation: Conversation,
    turns: TurnBudget,
    handoff_budget: Option<TurnBudget>,
    handoffs: u32,
    pending_handoff: Option<PendingHandoff>,
}

/// Use case driving the agent turn loop for one attempt.
pub struct WorkflowOrchestrator {
    roster: Arc<AgentRoster>,
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    observer: Arc<dyn WorkflowObserver>,
}

impl WorkflowOrchestrator {
    pub fn new(
        roster: Arc<AgentRoster>,
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            roster,
            gateway,
            tool_executor,
            tool_schema,
            observer: Arc::new(NoObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn observer(&self) -> &Arc<dyn WorkflowObserver> {
        &self.observer
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Run the state machine from `Dispatch(root)` to an absorbing state.
    ///
    /// `state` is mutated in place by tool calls; the caller owns it and
    /// decides whether to keep it.
    pub async fn run(
        &self,
        state: &mut SessionState,
        params: &ExecutionParams,
    ) -> Result<RunOutput, WorkflowError> {
        let root = self.roster.root_name().to_string();
        let mut ctx = RunContext {
            conversation: Conversation::new(),
            turns: TurnBudget::new(params.max_iterations),
            handoff_budget: params.max_handoffs.map(TurnBudget::new),
            handoffs: 0,
            pending_handoff: None,
        };
        ctx.conversation.push(Message::user(PromptTemplate::kickoff(state)));

        info!(
            root = %root,
            max_iterations = params.max_iterations,
            "Starting workflow run"
        );
        self.emit(WorkflowEvent::AgentSwitched {
            agent: root.clone(),
            from: None,
            reason: None,
        });

        let mut run_state = RunState::dispatch(root);
        let mut last_agent = String::new();
        let mut failure = None;

        while !run_state.is_absorbing() {
            if let Some(agent) = run_state.agent() {
                last_agent = agent.to_string();
            }
            debug!(state = %run_state, turn = ctx.turns.used(), "Run state");
            run_state = match self.step(run_state, &mut ctx, state).await {
                Ok(next) => next,
                Err(e) => {
                    let reason = e.to_string();
                    failure = Some(e);
                    RunState::Aborted { reason }
                }
            };
        }

        match (run_state, failure) {
            (RunState::Terminal { answer }, _) => {
                info!(
                    agent = %last_agent,
                    turns = ctx.turns.used(),
                    handoffs = ctx.handoffs,
                    "Workflow run reached a final answer"
                );
                Ok(RunOutput {
                    answer,
                    final_agent: last_agent,
                    turns: ctx.turns.used(),
                    handoffs: ctx.handoffs,
                    conversation: ctx.conversation,
                })
            }
            (_, Some(e)) => {
                warn!(agent = %last_agent, kind = e.kind(), "Workflow run aborted: {}", e);
                Err(e)
            }
            (other, None) => Err(WorkflowError::invalid(
                &last_agent,
                format!("run ended in non-terminal state {}", other),
            )),
        }
    }

    /// Perform one transition.
    async fn step(
        &self,
        run_state: RunState,
        ctx: &mut RunContext,
        state: &mut SessionState,
    ) -> Result<RunState, WorkflowError> {
        match run_state {
            RunState::Dispatch { agent } => {
                let turn = ctx
                    .turns
                    .consume()
                    .map_err(|e| WorkflowError::TurnBudgetExceeded {
                        max_iterations: e.max,
                    })?;
                debug!(agent = %agent, turn, remaining = ctx.turns.remaining(), "Dispatch");
                Ok(RunState::AwaitingModel { agent })
            }

            RunState::AwaitingModel { agent } => {
                let definition = self.agent(&agent)?;
                self.await_model(definition, ctx, state).await
            }

            RunState::ExecutingTools { agent, calls } => {
                for call in &calls {
                    self.execute_tool(&agent, call, ctx, state).await;
                }
                match ctx.pending_handoff.as_ref() {
                    Some(pending) => Ok(RunState::HandoffPending {
                        from: agent,
                        to: pending.to.clone(),
                    }),
                    None => Ok(RunState::Dispatch { agent }),
                }
            }

            RunState::HandoffPending { from, to } => {
                let pending = ctx.pending_handoff.take();
                if let Some(budget) = ctx.handoff_budget.as_mut() {
                    budget
                        .consume()
                        .map_err(|e| WorkflowError::HandoffBudgetExceeded {
                            max_handoffs: e.max,
                        })?;
                }
                ctx.handoffs += 1;

                let reason = pending.as_ref().and_then(|p| p.reason.clone());
                if let Some(pending) = &pending {
                    let note = match &reason {
                        Some(r) => format!("Control transferred to {}. Reason: {}", to, r),
                        None => format!("Control transferred to {}.", to),
                    };
                    ctx.conversation
                        .push(Message::tool_result(&pending.call_id, note));
                }

                info!(from = %from, to = %to, "Handoff");
                self.emit(WorkflowEvent::AgentSwitched {
                    agent: to.clone(),
                    from: Some(from),
                    reason,
                });
                Ok(RunState::Dispatch { agent: to })
            }

            absorbing @ (RunState::Terminal { .. } | RunState::Aborted { .. }) => Ok(absorbing),
        }
    }

    /// Invoke the model for `agent` and classify its output.
    async fn await_model(
        &self,
        agent: &AgentDefinition,
        ctx: &mut RunContext,
        state: &SessionState,
    ) -> Result<RunState, WorkflowError> {
        let request = self.build_request(agent, ctx, state);
        debug!(
            agent = %agent.name,
            model = %agent.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Invoking model"
        );
        let response = self.gateway.complete(&request).await?;

        let action = AgentAction::classify(&response).map_err(|e| match e {
            ActionError::Empty => WorkflowError::EmptyModelOutput {
                agent: agent.name.clone(),
            },
            other => WorkflowError::invalid(&agent.name, other.to_string()),
        })?;

        let text = response.text_content();
        let all_calls = response.tool_calls();
        self.emit(WorkflowEvent::AgentOutput {
            agent: agent.name.clone(),
            text: text.clone(),
            pending_tool_calls: all_calls.iter().map(|c| c.tool_name.clone()).collect(),
        });

        self.check_permissions(agent, &action)?;

        match action {
            AgentAction::Final(answer) => {
                ctx.conversation
                    .push(Message::assistant(answer.clone()).with_agent(&agent.name));
                Ok(RunState::Terminal { answer })
            }
            AgentAction::UseTools(calls) => {
                ctx.conversation
                    .push(Message::assistant_with_tools(&agent.name, text, all_calls));
                Ok(RunState::ExecutingTools {
                    agent: agent.name.clone(),
                    calls,
                })
            }
            AgentAction::Handoff {
                to,
                reason,
                preceding_calls,
            } => {
                let call_id = all_calls
                    .iter()
                    .find(|c| c.tool_name == crew_domain::HANDOFF_TOOL)
                    .and_then(|c| c.native_id.clone())
                    .unwrap_or_default();
                ctx.conversation
                    .push(Message::assistant_with_tools(&agent.name, text, all_calls));
                ctx.pending_handoff = Some(PendingHandoff {
                    to,
                    reason,
                    call_id,
                });
                Ok(RunState::ExecutingTools {
                    agent: agent.name.clone(),
                    calls: preceding_calls,
                })
            }
        }
    }

    /// Reject tools outside the agent's set and handoffs outside its targets.
    fn check_permissions(
        &self,
        agent: &AgentDefinition,
        action: &AgentAction,
    ) -> Result<(), WorkflowError> {
        if let Some(call) = action
            .tool_calls()
            .iter()
            .find(|c| !agent.may_use_tool(&c.tool_name))
        {
            return Err(WorkflowError::invalid(
                &agent.name,
                format!("tool '{}' is not in its tool set", call.tool_name),
            ));
        }
        if let AgentAction::Handoff { to, .. } = action
            && !agent.may_handoff_to(to)
        {
            return Err(WorkflowError::invalid(
                &agent.name,
                format!("handoff to '{}' is not among its handoff targets", to),
            ));
        }
        Ok(())
    }

    /// Execute one call, feed its result back and report it.
    async fn execute_tool(
        &self,
        agent: &str,
        call: &ToolCall,
        ctx: &mut RunContext,
        state: &mut SessionState,
    ) {
        let arguments = call.arguments_json();
        self.emit(WorkflowEvent::ToolInvoked {
            agent: agent.to_string(),
            tool_name: call.tool_name.clone(),
            arguments: arguments.clone(),
        });

        let started = Instant::now();
        let result = self.tool_executor.execute(call, state).await;
        let rendered = result.render_for_model();
        debug!(
            tool = %call.tool_name,
            success = result.is_success(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool finished: {}",
            preview(&rendered, 120)
        );

        let call_id = call.native_id.clone().unwrap_or_default();
        ctx.conversation
            .push(Message::tool_result(call_id, rendered.clone()));

        self.emit(WorkflowEvent::ToolCompleted {
            agent: agent.to_string(),
            tool_name: call.tool_name.clone(),
            arguments,
            result: rendered,
            success: result.is_success(),
        });
    }

    fn build_request(
        &self,
        agent: &AgentDefinition,
        ctx: &RunContext,
        state: &SessionState,
    ) -> CompletionRequest {
        let mut definitions: Vec<_> = agent
            .tools
            .iter()
            .filter_map(|name| self.tool_executor.get_tool(name).cloned())
            .collect();
        if agent.can_handoff() {
            definitions.push(handoff_tool_definition(&agent.handoff_targets));
        }

        let system_prompt = format!("{}\n\n{}", agent.system_prompt, state.render_for_prompt());
        CompletionRequest::new(agent.model.clone(), system_prompt)
            .with_messages(ctx.conversation.messages().to_vec())
            .with_tools(self.tool_schema.tools_schema(&definitions))
    }

    fn agent(&self, name: &str) -> Result<&AgentDefinition, WorkflowError> {
        self.roster
            .get(name)
            .ok_or_else(|| WorkflowError::UnknownAgent(name.to_string()))
    }

    fn emit(&self, event: WorkflowEvent) {
        self.observer.on_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::*;
    use crew_domain::{LlmResponse, Role};

    fn roster(agents: Vec<AgentDefinition>) -> Arc<AgentRoster> {
        let root = agents[0].name.clone();
        Arc::new(AgentRoster::new(agents, &root).unwrap())
    }

    fn two_agents() -> Arc<AgentRoster> {
        roster(vec![
            agent("Explorer")
                .with_tools(["record_notes", "note_count", "read_file"])
                .with_handoff_target("Writer"),
            agent("Writer").with_handoff_target("Explorer"),
        ])
    }

    struct Harness {
        gateway: Arc<ScriptedGateway>,
        tools: Arc<MockToolExecutor>,
        observer: Arc<RecordingObserver>,
        orchestrator: WorkflowOrchestrator,
    }

    fn harness(roster: Arc<AgentRoster>, gateway: ScriptedGateway) -> Harness {
        let gateway = Arc::new(gateway);
        let tools = Arc::new(MockToolExecutor::new());
        let observer = Arc::new(RecordingObserver::default());
        let orchestrator = WorkflowOrchestrator::new(
            roster,
            gateway.clone(),
            tools.clone(),
            Arc::new(MockToolSchema),
        )
        .with_observer(observer.clone());
        Harness {
            gateway,
            tools,
            observer,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn test_tools_then_handoff_then_final() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![tool("record_notes").with_arg("notes", "a CLI")]),
                calls(vec![handoff("Writer").with_arg("reason", "notes done")]),
                text("# Demo\n\nA CLI."),
            ]),
        );
        let mut state = state();

        let output = h
            .orchestrator
            .run(&mut state, &ExecutionParams::default())
            .await
            .unwrap();

        assert_eq!(output.answer, "# Demo\n\nA CLI.");
        assert_eq!(output.final_agent, "Writer");
        assert_eq!(output.turns, 3);
        assert_eq!(output.handoffs, 1);
        assert_eq!(state.notes()["project_overview"], "a CLI");
        assert_eq!(h.observer.switches(), vec!["Explorer", "Writer"]);

        // Writer sees the snapshot with the Explorer's note
        let prompts = h.gateway.system_prompts();
        assert!(prompts[0].starts_with("You are Explorer."));
        assert!(prompts[0].contains("(none recorded yet)"));
        assert!(prompts[2].starts_with("You are Writer."));
        assert!(prompts[2].contains("a CLI"));
    }

    #[tokio::test]
    async fn test_history_carries_across_handoff() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![handoff("Writer")]),
                text("done"),
            ]),
        );
        let mut state = state();
        let output = h
            .orchestrator
            .run(&mut state, &ExecutionParams::default())
            .await
            .unwrap();

        let requests = h.gateway.requests.lock().unwrap();
        let writer_messages = &requests[1].messages;
        assert_eq!(writer_messages[0].role, Role::User);
        assert_eq!(writer_messages[1].agent.as_deref(), Some("Explorer"));
        assert_eq!(writer_messages[2].role, Role::Tool);
        assert!(writer_messages[2].content.contains("Control transferred to Writer"));
        assert_eq!(output.conversation.len(), 4);
    }

    #[tokio::test]
    async fn test_handoff_tool_offered_only_with_targets() {
        let h = harness(
            roster(vec![
                agent("Explorer")
                    .with_tool("read_file")
                    .with_handoff_target("Writer"),
                agent("Writer"),
            ]),
            ScriptedGateway::new(vec![calls(vec![handoff("Writer")]), text("done")]),
        );
        h.orchestrator
            .run(&mut state(), &ExecutionParams::default())
            .await
            .unwrap();

        let requests = h.gateway.requests.lock().unwrap();
        let names = |i: usize| -> Vec<String> {
            requests[i]
                .tools
                .iter()
                .map(|t| t["name"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(names(0), vec!["read_file", "handoff"]);
        assert!(names(1).is_empty());
    }

    #[tokio::test]
    async fn test_turn_budget_stops_tool_loop() {
        let h = harness(
            two_agents(),
            ScriptedGateway::repeating(vec![calls(vec![tool("note_count")])]),
        );
        let params = ExecutionParams::default().with_max_iterations(5);

        let err = h.orchestrator.run(&mut state(), &params).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::TurnBudgetExceeded { max_iterations: 5 }
        ));
        assert_eq!(h.gateway.call_count(), 5);
    }

    #[tokio::test]
    async fn test_turn_budget_stops_handoff_cycle() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![handoff("Writer")]),
                calls(vec![handoff("Explorer")]),
                calls(vec![handoff("Writer")]),
                calls(vec![handoff("Explorer")]),
                text("never reached"),
            ]),
        );
        let params = ExecutionParams::default().with_max_iterations(4);

        let err = h.orchestrator.run(&mut state(), &params).await.unwrap_err();

        assert!(matches!(err, WorkflowError::TurnBudgetExceeded { .. }));
        assert_eq!(h.gateway.call_count(), 4);
    }

    #[tokio::test]
    async fn test_handoff_cap() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![handoff("Writer")]),
                calls(vec![handoff("Explorer")]),
                text("never reached"),
            ]),
        );
        let params = ExecutionParams::default().with_max_handoffs(Some(1));

        let err = h.orchestrator.run(&mut state(), &params).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::HandoffBudgetExceeded { max_handoffs: 1 }
        ));
    }

    #[tokio::test]
    async fn test_handoff_outside_targets_is_invalid() {
        let h = harness(
            roster(vec![
                agent("Explorer").with_handoff_target("Writer"),
                agent("Writer"),
                agent("Reviewer"),
            ]),
            ScriptedGateway::new(vec![calls(vec![handoff("Reviewer")])]),
        );

        let err = h
            .orchestrator
            .run(&mut state(), &ExecutionParams::default())
            .await
            .unwrap_err();

        match err {
            WorkflowError::InvalidAgentAction { agent, detail } => {
                assert_eq!(agent, "Explorer");
                assert!(detail.contains("Reviewer"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(h.observer.switches() == vec!["Explorer"]);
    }

    #[tokio::test]
    async fn test_tool_outside_set_is_invalid_and_batch_not_run() {
        let h = harness(
            roster(vec![agent("Explorer").with_tool("note_count")]),
            ScriptedGateway::new(vec![calls(vec![
                tool("note_count"),
                tool("record_notes").with_arg("notes", "sneaky"),
            ])]),
        );
        let mut state = state();

        let err = h
            .orchestrator
            .run(&mut state, &ExecutionParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidAgentAction { .. }));
        assert!(h.tools.executed().is_empty());
        assert!(state.notes().is_empty());
    }

    #[tokio::test]
    async fn test_calls_apply_in_emission_order() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![
                    tool("record_notes")
                        .with_arg("notes_title", "overview")
                        .with_arg("notes", "one"),
                    tool("note_count"),
                    tool("record_notes")
                        .with_arg("notes_title", "overview")
                        .with_arg("notes", "two"),
                ]),
                text("done"),
            ]),
        );
        let mut state = state();

        h.orchestrator
            .run(&mut state, &ExecutionParams::default())
            .await
            .unwrap();

        assert_eq!(
            h.tools.executed(),
            vec!["record_notes", "note_count", "record_notes"]
        );
        assert_eq!(state.notes()["overview"], "two");

        let count_result = h.observer.events().into_iter().find_map(|e| match e {
            WorkflowEvent::ToolCompleted {
                tool_name, result, ..
            } if tool_name == "note_count" => Some(result),
            _ => None,
        });
        // The second call observed the first call's mutation
        assert_eq!(count_result.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_preceding_calls_run_before_handoff() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![
                    handoff("Writer"),
                    tool("record_notes").with_arg("notes", "before leaving"),
                ]),
                text("done"),
            ]),
        );
        let mut state = state();

        h.orchestrator
            .run(&mut state, &ExecutionParams::default())
            .await
            .unwrap();

        let kinds: Vec<_> = h.observer.events().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "agent_switched",
                "agent_output",
                "tool_invoked",
                "tool_completed",
                "agent_switched",
                "agent_output",
            ]
        );
        assert!(h.gateway.system_prompts()[1].contains("before leaving"));
    }

    #[tokio::test]
    async fn test_tool_failure_is_fed_back() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![
                calls(vec![tool("read_file").with_arg("file_path", "missing.rs")]),
                text("recovered"),
            ]),
        );

        let output = h
            .orchestrator
            .run(&mut state(), &ExecutionParams::default())
            .await
            .unwrap();

        assert_eq!(output.answer, "recovered");
        let requests = h.gateway.requests.lock().unwrap();
        let tool_message = requests[1].messages.last().unwrap();
        assert_eq!(tool_message.role, Role::Tool);
        assert_eq!(tool_message.content, "[ERROR] File not found: missing.rs");
    }

    #[tokio::test]
    async fn test_empty_output_aborts() {
        let h = harness(
            two_agents(),
            ScriptedGateway::new(vec![LlmResponse::empty()]),
        );

        let err = h
            .orchestrator
            .run(&mut state(), &ExecutionParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::EmptyModelOutput { agent } if agent == "Explorer"));
    }

    #[tokio::test]
    async fn test_gateway_error_aborts() {
        let h = harness(two_agents(), ScriptedGateway::new(vec![]));

        let err = h
            .orchestrator
            .run(&mut state(), &ExecutionParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "gateway");
    }
}
