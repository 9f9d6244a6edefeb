//! Global sampling overrides from TOML (`[sampling]` section)

use crew_domain::SamplingOverrides;
use serde::{Deserialize, Serialize};

/// Optional overrides applied on top of each agent's own sampling.
///
/// Unset fields keep the per-agent values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSamplingConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl FileSamplingConfig {
    pub fn is_empty(&self) -> bool {
        self.to_overrides().is_empty()
    }

    pub fn to_overrides(&self) -> SamplingOverrides {
        SamplingOverrides {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}
