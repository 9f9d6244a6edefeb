//! Agent roster: the validated registry of agents and their handoff graph.
//!
//! Referential integrity is checked once at construction: every handoff
//! target must name a registered agent and the root must exist. Cycles in
//! the graph are allowed; a run is bounded by its turn budget instead.

use super::entities::AgentDefinition;
use super::model_config::{ModelBinding, SamplingOverrides, SamplingParams};
use crate::core::error::DomainError;
use crate::prompt::AgentPromptTemplate;
use crate::tool::builtin;
use std::collections::HashSet;

pub const EXPLORER: &str = "ExplorerAgent";
pub const RESEARCHER: &str = "ResearcherAgent";
pub const WRITER: &str = "WriterAgent";
pub const REVIEWER: &str = "ReviewerAgent";

/// Validated set of agents with a designated root.
#[derive(Debug, Clone)]
pub struct AgentRoster {
    agents: Vec<AgentDefinition>,
    root: String,
}

impl AgentRoster {
    pub fn new(agents: Vec<AgentDefinition>, root: &str) -> Result<Self, DomainError> {
        if agents.is_empty() {
            return Err(DomainError::NoAgents);
        }

        let mut names = HashSet::new();
        for agent in &agents {
            if !names.insert(agent.name.as_str()) {
                return Err(DomainError::DuplicateAgent(agent.name.clone()));
            }
        }

        if !names.contains(root) {
            return Err(DomainError::UnknownRootAgent(root.to_string()));
        }

        for agent in &agents {
            if let Some(target) = agent
                .handoff_targets
                .iter()
                .find(|t| !names.contains(t.as_str()))
            {
                return Err(DomainError::DanglingHandoff {
                    from: agent.name.clone(),
                    to: target.clone(),
                });
            }
        }

        Ok(Self {
            agents,
            root: root.to_string(),
        })
    }

    /// The four-agent README crew.
    ///
    /// Every agent binds `model` with its own sampling parameters;
    /// `overrides` replace individual sampling fields for all of them.
    pub fn readme_crew(model: &str, overrides: SamplingOverrides) -> Self {
        let bind = |sampling: SamplingParams| ModelBinding::new(model, overrides.apply(sampling));

        let explorer = AgentDefinition::new(
            EXPLORER,
            "Analyzes the project directory and source files to produce structured notes for README generation.",
            bind(SamplingParams::new(0.1, 0.1, 8192)),
        )
        .with_system_prompt(AgentPromptTemplate::explorer_system())
        .with_tools([
            builtin::GET_DIRECTORY_STRUCTURE,
            builtin::READ_FILE,
            builtin::READ_FILE_CHUNK,
            builtin::RECORD_NOTES,
        ])
        .with_handoff_targets([RESEARCHER, WRITER]);

        let researcher = AgentDefinition::new(
            RESEARCHER,
            "Collects up-to-date external information about the technologies used in the project via web search.",
            bind(SamplingParams::new(0.3, 0.5, 8192)),
        )
        .with_system_prompt(AgentPromptTemplate::researcher_system())
        .with_tool(builtin::SEARCH_WEB)
        .with_handoff_targets([WRITER, REVIEWER]);

        let writer = AgentDefinition::new(
            WRITER,
            "Writes a structured README.md from the recorded notes.",
            bind(SamplingParams::new(0.1, 0.1, 8192)),
        )
        .with_system_prompt(AgentPromptTemplate::writer_system())
        .with_tool(builtin::WRITE_README)
        .with_handoff_target(REVIEWER);

        let reviewer = AgentDefinition::new(
            REVIEWER,
            "Reviews the generated README against the project notes and suggests corrections.",
            bind(SamplingParams::new(0.2, 0.6, 8192)),
        )
        .with_system_prompt(AgentPromptTemplate::reviewer_system())
        .with_tool(builtin::REVIEW_README)
        .with_handoff_target(WRITER);

        Self {
            agents: vec![explorer, researcher, writer, reviewer],
            root: EXPLORER.to_string(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn root(&self) -> &AgentDefinition {
        // Presence of the root is checked in `new`
        self.get(&self.root).unwrap_or(&self.agents[0])
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn agents(&self) -> &[AgentDefinition] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str) -> AgentDefinition {
        AgentDefinition::new(name, "test", ModelBinding::new("m", SamplingParams::default()))
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert_eq!(AgentRoster::new(vec![], "A").unwrap_err(), DomainError::NoAgents);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = AgentRoster::new(vec![agent("A"), agent("A")], "A").unwrap_err();
        assert_eq!(err, DomainError::DuplicateAgent("A".into()));
    }

    #[test]
    fn test_unknown_root_rejected() {
        let err = AgentRoster::new(vec![agent("A")], "B").unwrap_err();
        assert_eq!(err, DomainError::UnknownRootAgent("B".into()));
    }

    #[test]
    fn test_dangling_handoff_rejected() {
        let err = AgentRoster::new(vec![agent("A").with_handoff_target("Ghost")], "A").unwrap_err();
        assert_eq!(
            err,
            DomainError::DanglingHandoff {
                from: "A".into(),
                to: "Ghost".into()
            }
        );
    }

    #[test]
    fn test_cycles_are_permitted() {
        let roster = AgentRoster::new(
            vec![agent("A").with_handoff_target("B"), agent("B").with_handoff_target("A")],
            "A",
        )
        .unwrap();
        assert_eq!(roster.root().name, "A");
        assert!(roster.get("B").unwrap().may_handoff_to("A"));
    }

    #[test]
    fn test_readme_crew_is_valid() {
        let crew = AgentRoster::readme_crew("gpt-4o-mini", SamplingOverrides::default());
        // Re-validating the built-in crew must succeed
        let validated = AgentRoster::new(crew.agents().to_vec(), crew.root_name()).unwrap();

        assert_eq!(validated.len(), 4);
        assert_eq!(validated.root().name, EXPLORER);
    }

    #[test]
    fn test_readme_crew_graph_and_tools() {
        let crew = AgentRoster::readme_crew("m", SamplingOverrides::default());

        let explorer = crew.get(EXPLORER).unwrap();
        assert_eq!(explorer.handoff_targets, vec![RESEARCHER, WRITER]);
        assert!(explorer.may_use_tool(builtin::READ_FILE_CHUNK));
        assert!(!explorer.may_use_tool(builtin::WRITE_README));

        let researcher = crew.get(RESEARCHER).unwrap();
        assert_eq!(researcher.handoff_targets, vec![WRITER, REVIEWER]);
        assert_eq!(researcher.tools, vec![builtin::SEARCH_WEB]);

        assert_eq!(crew.get(WRITER).unwrap().handoff_targets, vec![REVIEWER]);
        assert_eq!(crew.get(REVIEWER).unwrap().handoff_targets, vec![WRITER]);
    }

    #[test]
    fn test_readme_crew_sampling() {
        let crew = AgentRoster::readme_crew("m", SamplingOverrides::default());
        assert_eq!(crew.get(RESEARCHER).unwrap().model.sampling, SamplingParams::new(0.3, 0.5, 8192));
        assert_eq!(crew.get(REVIEWER).unwrap().model.sampling, SamplingParams::new(0.2, 0.6, 8192));
    }

    #[test]
    fn test_readme_crew_overrides_apply_to_all() {
        let overrides = SamplingOverrides {
            temperature: Some(0.7),
            top_p: None,
            max_tokens: Some(2048),
        };
        let crew = AgentRoster::readme_crew("m", overrides);
        for agent in crew.agents() {
            assert_eq!(agent.model.sampling.temperature, 0.7);
            assert_eq!(agent.model.sampling.max_tokens, 2048);
        }
        // top_p keeps each agent's own value
        assert_eq!(crew.get(REVIEWER).unwrap().model.sampling.top_p, 0.6);
    }
}
