//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the session result is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary with attempts, turns and the README text
    #[default]
    Full,
    /// Only the final README text
    Text,
    /// JSON object with the outcome
    Json,
}

/// CLI arguments for readme-crew
#[derive(Parser, Debug)]
#[command(name = "readme-crew")]
#[command(author, version, about = "Agent crew that explores a project and writes its README")]
#[command(long_about = r#"
readme-crew runs four cooperating agents over a project directory:

1. ExplorerAgent   scans the tree, reads source files and records notes
2. ResearcherAgent searches the web for background on libraries and tools
3. WriterAgent     writes README.md from the notes
4. ReviewerAgent   critiques the README and sends it back if needed

Agents hand control to each other; every model call counts against the
turn budget. A failed session is retried from scratch.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./readme-crew.toml                       Project-level config
3. ~/.config/readme-crew/config.toml        Global config

With --mcp the crew's tools are served to MCP clients over stdin/stdout
instead of running a session. The project root comes from --path, then
README_CREW_PROJECT_ROOT, then the root of the last session run.

Example:
  readme-crew --path ./my-project
  readme-crew -p . -r "Write the README in Korean, include a FAQ section"
  readme-crew -p . --model gpt-4o --temperature 0.2 --max-iterations 80
  readme-crew --mcp
"#)]
pub struct Cli {
    /// Project root to document
    #[arg(
        short,
        long,
        value_name = "DIR",
        required_unless_present_any = ["show_config", "mcp"]
    )]
    pub path: Option<PathBuf>,

    /// Extra requirements for the README (language, sections, tone)
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub requirements: String,

    /// Existing README location, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub readme_path: Option<PathBuf>,

    /// Model used by every agent
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Override the sampling temperature of every agent
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f32>,

    /// Override the nucleus-sampling threshold of every agent
    #[arg(long, value_name = "FLOAT")]
    pub top_p: Option<f32>,

    /// Override the output-length cap of every agent
    #[arg(long, value_name = "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Model invocations allowed per attempt
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Whole-session attempts before giving up
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Cap on agent handoffs per attempt
    #[arg(long, value_name = "N")]
    pub max_handoffs: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Serve the crew's tools over MCP on stdin/stdout instead of running a session
    #[arg(long, conflicts_with = "show_config")]
    pub mcp: bool,
}

impl Cli {
    /// Default log filter for the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
