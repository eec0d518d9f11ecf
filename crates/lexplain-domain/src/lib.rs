//! Lexplain Domain Layer
//!
//! This crate contains the core business logic and domain model for Lexplain.
//! It has no external dependencies beyond UUID generation and defines the
//! value objects, heuristics, and trait interfaces that all other layers
//! depend upon.
//!
//! ## Key Concepts
//!
//! - **Result Record**: The immutable output of one completed simplification
//! - **Complexity Score**: A 0-100 heuristic of sentence length and jargon density
//! - **Key Terms**: Archaic legal terms paired with their plain-English equivalents
//! - **Usage Events**: What a signed-in user did, for quota and billing views
//! - **Verification Summary**: The persisted outcome of an authenticity check
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complexity;
pub mod document;
pub mod identity;
pub mod terms;
pub mod traits;
pub mod usage;
pub mod verification;

// Re-exports for convenience
pub use complexity::{complexity_score, JARGON_TERMS};
pub use document::{DocumentDetails, DocumentId, DocumentType, ResultRecord, StoredDocument};
pub use identity::UserIdentity;
pub use terms::{extract_key_terms, KeyTerm, KEY_TERM_TABLE, MAX_KEY_TERMS};
pub use traits::{
    Anonymous, DocumentStore, GenerationError, IdentityProvider, LlmProvider, StaticIdentity,
    UsageStats,
};
pub use usage::{UsageAction, UsageEvent};
pub use verification::{ComplianceStatus, RiskLevel, VerificationSummary};

/// Length of a day in seconds, used for usage windows
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds since the Unix epoch, saturating to zero if the clock is before it
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
