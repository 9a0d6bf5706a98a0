//! Policy pricing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Fixed policy price in USD
    #[serde(default = "default_price_usd")]
    pub price_usd: u32,
}

impl PolicyConfig {
    /// Validate policy configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_usd == 0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            price_usd: default_price_usd(),
        }
    }
}

fn default_price_usd() -> u32 {
    100
}
