//! Telegram bot configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,
}

impl TelegramConfig {
    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM_BOT_TOKEN"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let config = TelegramConfig {
            bot_token: "  ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_accepted() {
        let config = TelegramConfig {
            bot_token: "123456:ABC-DEF".to_string(),
        };
        assert!(config.validate().is_ok());
    }
}
