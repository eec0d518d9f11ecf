//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// What the text is being validated for, used in messages
    pub purpose: String,

    /// Minimum length in characters
    pub min_length: usize,

    /// Maximum length in characters
    pub max_length: usize,

    /// Reject text containing `<...>` markup
    pub reject_markup: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::simplification()
    }
}

impl ValidationConfig {
    /// Rules for the simplification pipeline (50 to 50,000 characters, plain text only)
    pub fn simplification() -> Self {
        Self {
            purpose: "simplification".to_string(),
            min_length: 50,
            max_length: 50_000,
            reject_markup: true,
        }
    }

    /// Rules for authenticity analysis (100 to 100,000 characters)
    pub fn verification() -> Self {
        Self {
            purpose: "authenticity analysis".to_string(),
            min_length: 100,
            max_length: 100_000,
            reject_markup: false,
        }
    }

    /// Override the length limits
    pub fn with_limits(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.max_length == 0 {
            return Err(GatekeeperError::Config(
                "max_length must be greater than 0".to_string(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(GatekeeperError::Config(format!(
                "min_length ({}) must not exceed max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplification_config() {
        let config = ValidationConfig::simplification();
        assert_eq!(config.min_length, 50);
        assert_eq!(config.max_length, 50_000);
        assert!(config.reject_markup);
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_verification_config() {
        let config = ValidationConfig::verification();
        assert_eq!(config.min_length, 100);
        assert_eq!(config.max_length, 100_000);
        assert!(!config.reject_markup);
    }

    #[test]
    fn test_invalid_limits() {
        assert!(ValidationConfig::simplification().validate().is_ok());
        assert!(ValidationConfig::simplification()
            .with_limits(500, 100)
            .validate()
            .is_err());
        assert!(ValidationConfig::simplification()
            .with_limits(0, 0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ValidationConfig::verification().with_limits(10, 20);
        let text = toml::to_string(&config).unwrap();
        let parsed: ValidationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
