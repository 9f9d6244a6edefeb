//! Run-level prompt templates

use crate::session::state::SessionState;

/// Templates for the kickoff message and the review critique
pub struct PromptTemplate;

impl PromptTemplate {
    /// First user message handed to the root agent
    pub fn kickoff(state: &SessionState) -> String {
        let requirements = match state.user_requirements().trim() {
            "" => "none",
            r => r,
        };
        format!(
            r#"Write a new README for the project below and finish with a review.

- project_root: {}
- existing_readme_path: {}
- user_requirements: {}

Work through ExplorerAgent, ResearcherAgent, WriterAgent and ReviewerAgent, handing off as often as needed, and finish with a complete, reviewed README."#,
            state.project_root().display(),
            state.existing_readme_path().display(),
            requirements
        )
    }

    /// System prompt for the critique model call
    pub fn review_system() -> &'static str {
        r#"You are a meticulous technical reviewer of project documentation.
You compare a README with analysis notes about the code and report gaps and errors.
You answer with a single JSON object and nothing else."#
    }

    /// User prompt for the critique model call
    pub fn review_prompt(readme_text: &str, file_notes: &str) -> String {
        format!(
            r#"Here is the project's README:

[README]
{readme_text}

Here are the notes the ExplorerAgent recorded about the project structure:

[FILE NOTES]
{file_notes}

Review the README for accuracy and completeness and answer with JSON in this format:

{{
  "missing_items": ["important items the README does not cover"],
  "incorrect_descriptions": ["statements that are wrong or do not match the code"],
  "unclear_sections": ["sections that are vague or lack detail"],
  "suggested_patches": [
    {{
      "section": "section name or location",
      "before": "(summary of the current text)",
      "after": "(recommended improved text)"
    }}
  ]
}}

Output JSON only."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kickoff_includes_state() {
        let state = SessionState::new("/work/demo", "", "/work/demo/README.md");
        let msg = PromptTemplate::kickoff(&state);
        assert!(msg.contains("project_root: /work/demo"));
        assert!(msg.contains("existing_readme_path: /work/demo/README.md"));
        assert!(msg.contains("user_requirements: none"));
    }

    #[test]
    fn test_review_prompt_embeds_inputs() {
        let prompt = PromptTemplate::review_prompt("# Demo", "{\"overview\":\"cli\"}");
        assert!(prompt.contains("[README]\n# Demo"));
        assert!(prompt.contains("{\"overview\":\"cli\"}"));
        assert!(prompt.contains("\"suggested_patches\""));
    }
}
