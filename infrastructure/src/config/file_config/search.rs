//! Web search configuration from TOML (`[search]` section)

use crate::tools::{SearchProvider, SearchSettings, web_search::DEFAULT_MAX_RESULTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// `tavily` or `duckduckgo`
    pub provider: SearchProvider,
    /// Environment variable holding the Tavily key
    pub api_key_env: String,
    pub max_results: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProvider::Tavily,
            api_key_env: "TAVILY_API_KEY".to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl FileSearchConfig {
    /// Resolve the key from the environment. Without one, searches fall
    /// back to DuckDuckGo.
    pub fn to_settings(&self) -> SearchSettings {
        let api_key = if self.api_key_env.is_empty() {
            None
        } else {
            std::env::var(&self.api_key_env).ok()
        };
        SearchSettings {
            provider: self.provider,
            api_key,
            max_results: self.max_results,
        }
    }
}
