//! Lexplain Verifier
//!
//! Document authenticity analysis: asks a generative-language model for a
//! structured report on authenticity, fraud indicators and compliance.
//!
//! The model's answer is parsed strictly. When it contains no JSON object or
//! does not match the report schema, the analysis switches to
//! [`AnalysisMode::Fallback`] and the report is built from local heuristics
//! (legal vocabulary and word count). Only transport failures are errors.
//!
//! ```no_run
//! use lexplain_verifier::{certificate, VerificationRequest, Verifier, VerifierConfig};
//! use lexplain_llm::MockProvider;
//! use lexplain_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = Verifier::new(
//!     MockProvider::new("{}"),
//!     SqliteStore::new(":memory:")?,
//!     VerifierConfig::default(),
//! )?;
//!
//! let analysis = verifier
//!     .verify(VerificationRequest::new(std::fs::read_to_string("lease.txt")?))
//!     .await?;
//! println!("{}", certificate(&analysis));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analysis;
mod certificate;
mod config;
mod error;
mod parser;
mod prompt;
mod report;
mod verifier;

#[cfg(test)]
mod tests;

pub use analysis::{new_verification_id, to_base36, AuthenticityAnalysis, VerificationRequest};
pub use certificate::certificate;
pub use config::VerifierConfig;
pub use error::VerifierError;
pub use parser::{
    extract_json_object, fallback_report, has_legal_terms, parse_or_fallback, parse_report,
    AnalysisMode, ParseFailure,
};
pub use prompt::{build_prompt, REPORT_SCHEMA};
pub use report::{
    AnalysisReport, AuthenticityAssessment, ComplianceCheck, DocumentMetadata, DocumentStructure,
    FindingType, FraudDetection, FraudIndicator, IndicatorType, KeyFinding, LegalRequirement,
    MissingElement, Recommendation, RequirementStatus, Severity,
};
pub use verifier::Verifier;
