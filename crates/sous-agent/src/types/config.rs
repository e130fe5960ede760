use serde::{Deserialize, Serialize};

/// Default ceiling on model calls per loop run.
///
/// Nothing upstream bounds how many tool rounds a model may request, and
/// every round is a paid external call; the cap forces termination with a
/// best-effort answer instead.
pub const DEFAULT_MAX_MODEL_CALLS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of model calls in one run
    pub max_model_calls: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_model_calls: DEFAULT_MAX_MODEL_CALLS,
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_model_calls(mut self, max: usize) -> Self {
        self.max_model_calls = max;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}
