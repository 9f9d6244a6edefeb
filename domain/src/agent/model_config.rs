//! Per-agent model binding.
//!
//! Every agent owns its own [`ModelBinding`]: the model identifier plus the
//! sampling parameters used for that agent's calls. Two agents may share a
//! model name while sampling differently.

use serde::{Deserialize, Serialize};

/// Sampling configuration sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    /// Output-length cap in tokens.
    pub max_tokens: u32,
}

impl SamplingParams {
    pub const fn new(temperature: f32, top_p: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            top_p,
            max_tokens,
        }
    }

    /// Replace individual fields with caller-supplied overrides.
    pub fn with_overrides(
        mut self,
        temperature: Option<f32>,
        top_p: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Self {
        if let Some(t) = temperature {
            self.temperature = t;
        }
        if let Some(p) = top_p {
            self.top_p = p;
        }
        if let Some(m) = max_tokens {
            self.max_tokens = m;
        }
        self
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::new(0.1, 0.1, 8192)
    }
}

/// Optional overrides applied on top of every agent's own sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingOverrides {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl SamplingOverrides {
    pub fn apply(&self, params: SamplingParams) -> SamplingParams {
        params.with_overrides(self.temperature, self.top_p, self.max_tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.max_tokens.is_none()
    }
}

/// A model oracle reference: which model to call and how to sample it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBinding {
    pub model: String,
    pub sampling: SamplingParams,
}

impl ModelBinding {
    pub fn new(model: impl Into<String>, sampling: SamplingParams) -> Self {
        Self {
            model: model.into(),
            sampling,
        }
    }
}

impl std::fmt::Display for ModelBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (temperature={}, top_p={}, max_tokens={})",
            self.model, self.sampling.temperature, self.sampling.top_p, self.sampling.max_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let params = SamplingParams::new(0.3, 0.5, 4096).with_overrides(Some(0.0), None, None);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.top_p, 0.5);
        assert_eq!(params.max_tokens, 4096);
    }

    #[test]
    fn test_empty_overrides_are_identity() {
        let overrides = SamplingOverrides::default();
        assert!(overrides.is_empty());
        let params = SamplingParams::new(0.2, 0.6, 8192);
        assert_eq!(overrides.apply(params), params);
    }

    #[test]
    fn test_binding_display() {
        let binding = ModelBinding::new("gpt-4o-mini", SamplingParams::default());
        let text = binding.to_string();
        assert!(text.starts_with("gpt-4o-mini"));
        assert!(text.contains("max_tokens=8192"));
    }
}
