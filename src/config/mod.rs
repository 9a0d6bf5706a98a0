//! Application configuration module
//!
//! Provides type-safe configuration loading from environment variables using
//! the `config` and `dotenvy` crates. Configuration is loaded with the
//! `POLICYBOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use policybot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod assistant;
mod error;
mod policy;
mod recognition;
mod telegram;

pub use assistant::AssistantConfig;
pub use error::{ConfigError, ValidationError};
pub use policy::PolicyConfig;
pub use recognition::RecognitionConfig;
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the bot. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot configuration (token)
    pub telegram: TelegramConfig,

    /// Document recognition configuration (Mindee OCR)
    pub recognition: RecognitionConfig,

    /// Free-form assistant configuration (Mistral)
    pub assistant: AssistantConfig,

    /// Policy pricing
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `POLICYBOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `POLICYBOT__TELEGRAM__BOT_TOKEN=...` -> `telegram.bot_token = ...`
    /// - `POLICYBOT__POLICY__PRICE_USD=100` -> `policy.price_usd = 100`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("POLICYBOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.telegram.validate()?;
        self.recognition.validate()?;
        self.assistant.validate()?;
        self.policy.validate()?;
        Ok(())
    }
}
