//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Simplification failed
    #[error(transparent)]
    Simplifier(#[from] lexplain_simplifier::SimplifierError),

    /// Authenticity analysis failed
    #[error(transparent)]
    Verifier(#[from] lexplain_verifier::VerifierError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] lexplain_store::StoreError),

    /// Model provider could not be set up
    #[error("Model provider error: {0}")]
    Llm(#[from] lexplain_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing stored under the id for the current user
    #[error("Not found: {0}")]
    NotFound(String),
}
