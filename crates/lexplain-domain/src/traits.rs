//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{
    unix_now, DocumentDetails, DocumentId, ResultRecord, StoredDocument, UsageAction, UsageEvent,
    UserIdentity, VerificationSummary, SECONDS_PER_DAY,
};

/// Classification every generation error must expose
///
/// The orchestrator only needs to know whether a failure is worth retrying.
pub trait GenerationError: std::error::Error + Send + Sync + 'static {
    /// True when the service refused the call because of a rate limit
    fn is_rate_limited(&self) -> bool;

    /// True when the call did not finish within its time limit
    fn is_timeout(&self) -> bool {
        false
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (lexplain-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error: GenerationError;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output that should conform to a JSON schema description
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Trait for storing simplification results, usage events and
/// verification summaries
///
/// Implemented by the infrastructure layer (lexplain-store)
pub trait DocumentStore {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a completed result record for `owner_id`
    fn save_document(
        &mut self,
        owner_id: &str,
        original_text: &str,
        details: &DocumentDetails,
        record: &ResultRecord,
    ) -> Result<DocumentId, Self::Error>;

    /// Most recent documents of `owner_id`, newest first
    fn fetch_history(&self, owner_id: &str, limit: usize)
        -> Result<Vec<StoredDocument>, Self::Error>;

    /// Get a stored document by ID
    fn get_document(&self, id: DocumentId) -> Result<Option<StoredDocument>, Self::Error>;

    /// Record a usage event
    fn track_usage(&mut self, event: &UsageEvent) -> Result<(), Self::Error>;

    /// Usage events of `owner_id` created at or after `since` (epoch seconds)
    fn usage_since(&self, owner_id: &str, since: u64) -> Result<Vec<UsageEvent>, Self::Error>;

    /// Persist an authenticity verification summary
    fn save_verification(
        &mut self,
        owner_id: &str,
        summary: &VerificationSummary,
    ) -> Result<DocumentId, Self::Error>;

    /// Most recent verifications of `owner_id`, newest first
    fn verification_history(
        &self,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<VerificationSummary>, Self::Error>;

    /// Get a stored document only if `owner_id` owns it
    ///
    /// Documents of other owners are reported as absent.
    fn get_owned_document(
        &self,
        owner_id: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, Self::Error> {
        Ok(self.get_document(id)?.filter(|doc| doc.owner_id == owner_id))
    }

    /// Usage events of `owner_id` over the last `days` days
    fn usage_in_last_days(
        &self,
        owner_id: &str,
        days: u64,
    ) -> Result<Vec<UsageEvent>, Self::Error> {
        let since = unix_now().saturating_sub(days.saturating_mul(SECONDS_PER_DAY));
        self.usage_since(owner_id, since)
    }
}

/// Aggregated usage of one user over a period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageStats {
    /// Total number of events
    pub total_events: usize,

    /// Events that submitted text for simplification
    pub text_processing: usize,

    /// Events that called the generative-language service
    pub api_calls: usize,

    /// Authenticity checks run
    pub authenticity_checks: usize,

    /// Sum of approximate tokens
    pub tokens_used: u64,

    /// Sum of recorded processing time in milliseconds
    pub processing_time_ms: u64,
}

impl UsageStats {
    /// Aggregate a list of events
    pub fn from_events(events: &[UsageEvent]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            stats.total_events += 1;
            match event.action {
                UsageAction::TextProcessing => stats.text_processing += 1,
                UsageAction::ApiCall => stats.api_calls += 1,
                UsageAction::DocumentAuthenticityCheck => stats.authenticity_checks += 1,
                UsageAction::DocumentUpload | UsageAction::ResultDownload => {}
            }
            stats.tokens_used += event.tokens_used.unwrap_or(0);
            stats.processing_time_ms += event.processing_time_ms.unwrap_or(0);
            stats
        })
    }
}

/// Trait for resolving the signed-in user
///
/// Returning `None` means the request is anonymous and nothing is persisted.
pub trait IdentityProvider: Send + Sync {
    /// The current user, if any
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Identity provider for anonymous use
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_user(&self) -> Option<UserIdentity> {
        None
    }
}

/// Identity provider that always reports the same user
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub UserIdentity);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        Some(self.0.clone())
    }
}
