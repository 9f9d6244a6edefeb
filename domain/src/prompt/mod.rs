//! Prompt domain
//!
//! Role prompts for each agent of the crew, the kickoff message that starts
//! a run, and the critique prompt used by the review tool.

pub mod agent;
mod template;

pub use agent::AgentPromptTemplate;
pub use template::PromptTemplate;
