//! Error types for the Verifier

use thiserror::Error;

/// Errors that can occur during authenticity analysis
///
/// An unreadable model answer is not an error: it switches the analysis to
/// fallback mode instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifierError {
    /// Input rejected before any processing
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The transformation service failed
    #[error("Document analysis failed: {0}")]
    Llm(String),

    /// The service did not answer in time
    #[error("Document analysis timed out after {0} seconds")]
    Timeout(u64),

    /// Document store error on a read operation
    #[error("Store error: {0}")]
    Store(String),

    /// Report could not be serialized
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerifierError {
    /// Messages suitable for showing to the submitter
    pub fn messages(&self) -> Vec<String> {
        match self {
            VerifierError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<serde_json::Error> for VerifierError {
    fn from(e: serde_json::Error) -> Self {
        VerifierError::Json(e.to_string())
    }
}

impl From<lexplain_gatekeeper::GatekeeperError> for VerifierError {
    fn from(e: lexplain_gatekeeper::GatekeeperError) -> Self {
        match e {
            lexplain_gatekeeper::GatekeeperError::Rejected(messages) => {
                VerifierError::Validation(messages)
            }
            lexplain_gatekeeper::GatekeeperError::Config(msg) => VerifierError::Config(msg),
        }
    }
}
