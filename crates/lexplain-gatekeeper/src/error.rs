//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text failed validation; carries every message
    #[error("Validation failed: {}", .0.join("; "))]
    Rejected(Vec<String>),
}
