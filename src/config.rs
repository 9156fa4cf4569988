use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};

/// Template constants used by the wallet statement extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tag printed before every amount, also required on transaction lines
    pub currency: String,
    /// `YYYY-MM-DD` used until the first date heading is seen
    pub fallback_date: String,
    pub category: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            currency: "NGN".to_string(),
            fallback_date: "2025-03-05".to_string(),
            category: "Wallet".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Reads a config from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> StatementResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StatementParseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StatementResult<()> {
        if self.currency.trim().is_empty() || self.currency.chars().any(char::is_whitespace) {
            return Err(StatementParseError::InvalidConfig(format!(
                "currency must be a single non-empty token, got {:?}",
                self.currency
            )));
        }

        NaiveDate::parse_from_str(&self.fallback_date, "%Y-%m-%d").map_err(|e| {
            StatementParseError::InvalidConfig(format!(
                "fallback_date {:?} is not YYYY-MM-DD: {}",
                self.fallback_date, e
            ))
        })?;

        if self.category.trim().is_empty() {
            return Err(StatementParseError::InvalidConfig(
                "category must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
