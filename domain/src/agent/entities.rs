//! Agent domain entities

use super::model_config::ModelBinding;
use serde::{Deserialize, Serialize};

/// Immutable definition of one agent role.
///
/// Created at process start and never mutated during a run. The `name` is
/// used both as the handoff target identifier and as the "current agent"
/// tag on workflow events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique identifier.
    pub name: String,
    /// Human-readable role summary (documentation only, not routing).
    pub description: String,
    /// Tools this agent may invoke, in declaration order.
    pub tools: Vec<String>,
    /// Fixed behavioral instructions for the model.
    pub system_prompt: String,
    /// Model oracle and sampling parameters for this agent.
    pub model: ModelBinding,
    /// Agents this agent may transfer control to.
    pub handoff_targets: Vec<String>,
}

impl AgentDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        model: ModelBinding,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tools: Vec::new(),
            system_prompt: String::new(),
            model,
            handoff_targets: Vec::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Add a tool to the permitted set. Duplicates are ignored.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        let tool = tool.into();
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tool in tools {
            self = self.with_tool(tool);
        }
        self
    }

    /// Add a handoff target. Duplicates are ignored.
    pub fn with_handoff_target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        if !self.handoff_targets.contains(&target) {
            self.handoff_targets.push(target);
        }
        self
    }

    pub fn with_handoff_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for target in targets {
            self = self.with_handoff_target(target);
        }
        self
    }

    pub fn may_use_tool(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }

    pub fn may_handoff_to(&self, agent: &str) -> bool {
        self.handoff_targets.iter().any(|t| t == agent)
    }

    pub fn can_handoff(&self) -> bool {
        !self.handoff_targets.is_empty()
    }
}
