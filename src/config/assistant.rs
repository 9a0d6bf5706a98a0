//! Free-form assistant (LLM) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Mistral assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Mistral API key
    pub api_key: String,

    /// Model to use for chat completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the Mistral API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AssistantConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MISTRAL_API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ASSISTANT_MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidBaseUrl("assistant.base_url"));
        }
        Ok(())
    }
}

fn default_model() -> String {
    "mistral-small-latest".to_string()
}

fn default_base_url() -> String {
    "https://api.mistral.ai/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}
