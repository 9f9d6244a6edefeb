//! Console output formatter for session results

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use crew_application::SessionOutcome;
use crew_domain::{ReviewFeedback, SessionState};
use serde_json::json;

/// Formats session outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn render(outcome: &SessionOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Text => Self::format_text(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Summary header plus the final text
    pub fn format(outcome: &SessionOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("README Crew Result"));
        output.push('\n');

        let status = if outcome.succeeded {
            "succeeded".green().bold()
        } else {
            "failed".red().bold()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));
        output.push_str(&format!("{} {}\n", "Attempts:".cyan().bold(), outcome.attempts));
        if let Some(turns) = outcome.turns {
            output.push_str(&format!("{} {}\n", "Turns:".cyan().bold(), turns));
        }

        if let Some(state) = &outcome.state {
            output.push_str(&format!(
                "{} {}\n",
                "Project:".cyan().bold(),
                state.project_root().display()
            ));
            let titles: Vec<&str> = state.notes().keys().map(String::as_str).collect();
            if !titles.is_empty() {
                output.push_str(&format!("{} {}\n", "Notes:".cyan().bold(), titles.join(", ")));
            }
            if let Some(summary) = Self::review_summary(state) {
                output.push_str(&format!("{} {}\n", "Review:".cyan().bold(), summary));
            }
        }

        if !outcome.failures.is_empty() {
            output.push_str(&format!("\n{}\n", "Failed attempts:".yellow().bold()));
            for (i, failure) in outcome.failures.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, failure));
            }
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&outcome.text);
        output.push('\n');
        output.push_str(&Self::footer());

        output
    }

    /// The final text only
    pub fn format_text(outcome: &SessionOutcome) -> String {
        format!("{}\n", outcome.text)
    }

    /// Format as JSON
    pub fn format_json(outcome: &SessionOutcome) -> String {
        let value = json!({
            "succeeded": outcome.succeeded,
            "attempts": outcome.attempts,
            "turns": outcome.turns,
            "failures": outcome.failures,
            "text": outcome.text,
            "notes": outcome.state.as_ref().map(|s| s.notes_json()),
            "readme": outcome.state.as_ref().and_then(|s| s.readme()),
            "review_issues": outcome.state.as_ref().and_then(Self::review_issues),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Issue count of the last review, when it was structured.
    fn review_issues(state: &SessionState) -> Option<usize> {
        let raw = state.feedback()?;
        ReviewFeedback::parse_best_effort(raw)
            .feedback
            .map(|f| f.issue_count())
    }

    fn review_summary(state: &SessionState) -> Option<String> {
        let raw = state.feedback()?;
        let summary = match ReviewFeedback::parse_best_effort(raw).feedback {
            Some(f) if f.is_clean() && f.issue_count() == 0 => "clean".to_string(),
            Some(f) if f.is_clean() => format!("clean, {} unclear section(s)", f.issue_count()),
            Some(f) => format!("{} open issue(s)", f.issue_count()),
            None => "unstructured feedback".to_string(),
        };
        Some(summary)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
