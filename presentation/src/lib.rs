//! Presentation layer for readme-crew
//!
//! This crate contains the CLI definition, the console progress reporter
//! and result formatting.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ConsoleReporter;
