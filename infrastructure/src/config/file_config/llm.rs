//! Model endpoint configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw model endpoint configuration
///
/// # Example
///
/// ```toml
/// [llm]
/// base_url = "https://api.openai.com/v1"
/// model = "gpt-4o-mini"
/// api_key_env = "OPENAI_API_KEY"   # "" for servers without auth
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Model used by every agent and by the review tool
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// HTTP timeout per completion
    pub timeout_seconds: u64,
}

impl FileLlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
        }
    }
}
