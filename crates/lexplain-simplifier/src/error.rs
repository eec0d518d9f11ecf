//! Error types for the Simplifier

use std::fmt;
use thiserror::Error;

/// Classification of a failed transformation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The service refused the call because of a rate limit
    RateLimited,

    /// The call did not finish within the per-call timeout
    Timeout,

    /// Any other service or transport failure
    Service,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RateLimited => f.write_str("rate limited"),
            FailureKind::Timeout => f.write_str("timed out"),
            FailureKind::Service => f.write_str("service error"),
        }
    }
}

/// Errors that can occur during simplification
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplifierError {
    /// Input rejected before any processing
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A chunk could not be transformed; the whole job is aborted
    #[error("Failed to process chunk {} after {attempts} attempt(s) ({kind}): {reason}", .index + 1)]
    ChunkFailed {
        /// Zero-based index of the failing chunk
        index: usize,
        /// Attempts made for this chunk
        attempts: u32,
        /// Classification of the last failure
        kind: FailureKind,
        /// Message of the last failure
        reason: String,
    },

    /// Document store error on a read operation
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SimplifierError {
    /// Messages suitable for showing to the submitter
    pub fn messages(&self) -> Vec<String> {
        match self {
            SimplifierError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<lexplain_gatekeeper::GatekeeperError> for SimplifierError {
    fn from(e: lexplain_gatekeeper::GatekeeperError) -> Self {
        match e {
            lexplain_gatekeeper::GatekeeperError::Rejected(messages) => {
                SimplifierError::Validation(messages)
            }
            lexplain_gatekeeper::GatekeeperError::Config(msg) => SimplifierError::Config(msg),
        }
    }
}
