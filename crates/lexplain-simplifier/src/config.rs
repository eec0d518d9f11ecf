//! Configuration for the Simplifier

use crate::retry::RetryPolicy;
use lexplain_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Simplifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifierConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Minimum input text length (characters)
    pub min_text_length: usize,

    /// Maximum chunk size (characters)
    pub max_chunk_size: usize,

    /// Maximum time for a single transformation call (seconds)
    pub call_timeout_secs: u64,

    /// Pause between consecutive chunks (milliseconds)
    pub inter_chunk_delay_ms: u64,

    /// Wait before retrying a rate-limited chunk (seconds)
    pub rate_limit_backoff_secs: u64,

    /// Attempts per chunk, including the first
    pub max_attempts: u32,
}

impl SimplifierConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Get the inter-chunk delay as a Duration
    pub fn inter_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.inter_chunk_delay_ms)
    }

    /// Retry policy derived from this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_secs(self.rate_limit_backoff_secs),
        )
    }

    /// Input validation rules derived from this configuration
    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig::simplification().with_limits(self.min_text_length, self.max_text_length)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.min_text_length > self.max_text_length {
            return Err("min_text_length cannot exceed max_text_length".to_string());
        }
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            min_text_length: 50,
            max_chunk_size: 3_500,
            call_timeout_secs: 60,
            inter_chunk_delay_ms: 500,
            rate_limit_backoff_secs: 5,
            max_attempts: 2,
        }
    }
}

impl SimplifierConfig {
    /// Aggressive preset: shorter timeouts and no retry, for interactive use
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            min_text_length: 50,
            max_chunk_size: 2_000,
            call_timeout_secs: 30,
            inter_chunk_delay_ms: 250,
            rate_limit_backoff_secs: 2,
            max_attempts: 1,
        }
    }

    /// Lenient preset: longer timeouts and more retries, for batch use
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            min_text_length: 50,
            max_chunk_size: 6_000,
            call_timeout_secs: 120,
            inter_chunk_delay_ms: 1_000,
            rate_limit_backoff_secs: 10,
            max_attempts: 3,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimplifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chunk_size, 3_500);
        assert_eq!(config.call_timeout(), Duration::from_secs(60));
        assert_eq!(config.inter_chunk_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(SimplifierConfig::aggressive().validate().is_ok());
        assert!(SimplifierConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = SimplifierConfig {
            max_chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = SimplifierConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = SimplifierConfig::default().retry_policy();
        assert_eq!(policy.max_attempts(), 2);
        assert_eq!(policy.backoff(), Duration::from_secs(5));
    }

    #[test]
    fn test_validation_limits_follow_config() {
        let config = SimplifierConfig {
            min_text_length: 10,
            max_text_length: 100,
            ..Default::default()
        };
        let rules = config.validation_config();
        assert_eq!(rules.min_length, 10);
        assert_eq!(rules.max_length, 100);
        assert!(rules.reject_markup);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimplifierConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = SimplifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = SimplifierConfig::from_toml("max_chunk_size = 1000").unwrap();
        assert_eq!(parsed.max_chunk_size, 1000);
        assert_eq!(parsed.max_attempts, 2);
    }
}
