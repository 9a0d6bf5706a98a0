//! Document recognition (OCR) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Mindee OCR configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    /// Mindee API key
    pub api_key: String,

    /// Account owning the custom document endpoints
    #[serde(default = "default_account")]
    pub account: String,

    /// Base URL for the Mindee API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RecognitionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate recognition configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MINDEE_API_KEY"));
        }
        if self.account.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MINDEE_ACCOUNT"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidBaseUrl("recognition.base_url"));
        }
        Ok(())
    }
}

fn default_account() -> String {
    "vampl".to_string()
}

fn default_base_url() -> String {
    "https://api.mindee.net/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}
