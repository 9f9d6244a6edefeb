//! Configuration file loading for readme-crew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. CLI flags (applied by the binary after loading)
//! 2. `README_CREW_*` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./readme-crew.toml` or `./.readme-crew.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/readme-crew/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig, FileSamplingConfig,
    FileSearchConfig, FileWorkflowConfig,
};
pub use loader::{ConfigLoader, ConfigSource};
