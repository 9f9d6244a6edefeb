//! Console progress for README sessions

use colored::Colorize;
use crew_application::ports::observer::WorkflowObserver;
use crew_domain::WorkflowEvent;
use crew_domain::util::preview;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const PREVIEW_CHARS: usize = 80;

/// Reports agent switches and tool activity with a spinner.
///
/// Completed steps are printed above the spinner; the spinner line shows
/// what is running now.
pub struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    /// Line printed for a finished step, if the event produces one.
    pub fn event_line(event: &WorkflowEvent) -> Option<String> {
        match event {
            WorkflowEvent::AgentSwitched { agent, from, reason } => {
                let line = match from {
                    Some(from) => format!("{} {} {}", "->".cyan(), from.dimmed(), agent.bold()),
                    None => format!("{} {}", "->".cyan(), agent.bold()),
                };
                Some(match reason {
                    Some(reason) => format!("{} {}", line, preview(reason, PREVIEW_CHARS).dimmed()),
                    None => line,
                })
            }
            WorkflowEvent::ToolCompleted {
                tool_name,
                result,
                success,
                ..
            } => {
                let mark = if *success { "v".green() } else { "x".red() };
                Some(format!(
                    "   {} {} {}",
                    mark,
                    tool_name,
                    preview(result, PREVIEW_CHARS).dimmed()
                ))
            }
            WorkflowEvent::AgentOutput { .. } | WorkflowEvent::ToolInvoked { .. } => None,
        }
    }

    /// Spinner message for an event in progress.
    pub fn spinner_message(event: &WorkflowEvent) -> Option<String> {
        match event {
            WorkflowEvent::AgentSwitched { agent, .. } => Some(format!("{} is thinking...", agent)),
            WorkflowEvent::ToolInvoked { agent, tool_name, .. } => {
                Some(format!("{} running {}", agent, tool_name))
            }
            WorkflowEvent::AgentOutput {
                agent,
                pending_tool_calls,
                ..
            } if pending_tool_calls.is_empty() => Some(format!("{} answered", agent)),
            _ => None,
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowObserver for ConsoleReporter {
    fn on_event(&self, event: &WorkflowEvent) {
        self.with_spinner(|pb| {
            if let Some(line) = Self::event_line(event) {
                pb.println(line);
            }
            if let Some(message) = Self::spinner_message(event) {
                pb.set_message(message);
            }
        });
    }

    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Attempt {}/{}", attempt, max_attempts));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock()
            && let Some(old) = guard.replace(pb)
        {
            old.finish_and_clear();
        }
    }

    fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = guard.take() {
            match failure {
                None => pb.finish_with_message(format!("{}", "README ready".green())),
                Some(reason) => pb.finish_with_message(format!(
                    "{} attempt {} failed: {}",
                    "x".red(),
                    attempt,
                    preview(reason, PREVIEW_CHARS)
                )),
            }
        }
    }
}
