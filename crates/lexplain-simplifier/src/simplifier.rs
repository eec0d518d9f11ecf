//! Core Simplifier implementation

use crate::assembler::ResultAssembler;
use crate::best_effort::{best_effort, FailureSink, TracingSink};
use crate::chunking::TextChunker;
use crate::config::SimplifierConfig;
use crate::error::SimplifierError;
use crate::orchestrator::Orchestrator;
use crate::progress::{NoProgress, ProgressSink, ProgressUpdate};
use crate::retry::{Sleeper, TokioSleeper};
use crate::types::{SimplificationRequest, SimplificationResponse};
use lexplain_domain::traits::{Anonymous, DocumentStore, IdentityProvider, LlmProvider, UsageStats};
use lexplain_domain::{
    DocumentId, ResultRecord, StoredDocument, UsageAction, UsageEvent, UserIdentity,
};
use lexplain_gatekeeper::Gatekeeper;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

/// Rough token count for usage accounting: one token per four characters
pub fn approximate_tokens(original_len: usize, simplified_len: usize) -> u64 {
    (original_len + simplified_len).div_ceil(4) as u64
}

/// The Simplifier turns legal text into plain English, chunk by chunk
///
/// Results are persisted only when the identity provider reports a user.
/// Persistence and usage tracking never fail a simplification.
pub struct Simplifier<L, S, Z = TokioSleeper>
where
    L: LlmProvider,
    S: DocumentStore,
{
    llm_provider: Arc<L>,
    store: Arc<Mutex<S>>,
    gatekeeper: Gatekeeper,
    chunker: TextChunker,
    config: SimplifierConfig,
    identity: Arc<dyn IdentityProvider>,
    failure_sink: Arc<dyn FailureSink>,
    sleeper: Z,
    endpoint: String,
}

impl<L, S> Simplifier<L, S, TokioSleeper>
where
    L: LlmProvider + Send + Sync + 'static,
    S: DocumentStore,
{
    /// Create a new Simplifier
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration does not validate.
    pub fn new(
        llm_provider: L,
        store: S,
        config: SimplifierConfig,
    ) -> Result<Self, SimplifierError> {
        config.validate().map_err(SimplifierError::Config)?;
        let gatekeeper = Gatekeeper::new(config.validation_config());

        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            store: Arc::new(Mutex::new(store)),
            gatekeeper,
            chunker: TextChunker::new(config.max_chunk_size),
            config,
            identity: Arc::new(Anonymous),
            failure_sink: Arc::new(TracingSink),
            sleeper: TokioSleeper,
            endpoint: "llm".to_string(),
        })
    }
}

impl<L, S, Z> Simplifier<L, S, Z>
where
    L: LlmProvider + Send + Sync + 'static,
    S: DocumentStore,
    Z: Sleeper,
{
    /// Use `identity` to decide who owns persisted results
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    /// Report swallowed persistence failures to `sink`
    pub fn with_failure_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.failure_sink = sink;
        self
    }

    /// Label recorded as the endpoint of `api_call` usage events
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the sleeper used for throttling and backoff
    pub fn with_sleeper<Z2: Sleeper>(self, sleeper: Z2) -> Simplifier<L, S, Z2> {
        Simplifier {
            llm_provider: self.llm_provider,
            store: self.store,
            gatekeeper: self.gatekeeper,
            chunker: self.chunker,
            config: self.config,
            identity: self.identity,
            failure_sink: self.failure_sink,
            sleeper,
            endpoint: self.endpoint,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Check `text` against the input rules without processing it
    pub fn validate(&self, text: &str) -> Result<(), SimplifierError> {
        self.gatekeeper.validate(text).into_result()?;
        Ok(())
    }

    /// Simplify a document
    pub async fn simplify(
        &self,
        request: SimplificationRequest,
    ) -> Result<SimplificationResponse, SimplifierError> {
        self.simplify_with_progress(request, &NoProgress).await
    }

    /// Simplify a document, reporting progress to `progress`
    ///
    /// # Errors
    ///
    /// Returns `Validation` before any processing when the input is rejected,
    /// and `ChunkFailed` when a chunk cannot be transformed.
    pub async fn simplify_with_progress(
        &self,
        request: SimplificationRequest,
        progress: &dyn ProgressSink,
    ) -> Result<SimplificationResponse, SimplifierError> {
        let start = Instant::now();
        progress.report(ProgressUpdate::new(10, "Analyzing document structure..."));

        self.validate(&request.text)?;

        let user = self.identity.current_user();
        info!(
            "Starting simplification: {} chars, type '{}', owner {}",
            request.text.chars().count(),
            request.document_type,
            user.as_ref().map(|u| u.id.as_str()).unwrap_or("anonymous")
        );

        if let Some(user) = &user {
            self.track(processing_event(user, &request));
        }

        let chunks = self.chunker.chunk(&request.text);
        if chunks.len() > 1 {
            info!("Text exceeds max chunk size, processing {} chunks", chunks.len());
            progress.report(ProgressUpdate::new(
                20,
                format!("Processing document in {} parts...", chunks.len()),
            ));
        }

        let orchestrator = Orchestrator::new(
            Arc::clone(&self.llm_provider),
            &self.sleeper,
            self.config.retry_policy(),
            self.config.call_timeout(),
            self.config.inter_chunk_delay(),
        );
        let outputs = orchestrator
            .run(chunks, request.document_type, progress)
            .await?;

        progress.report(ProgressUpdate::new(85, "Combining results..."));
        progress.report(ProgressUpdate::new(90, "Calculating metrics..."));
        let record = ResultAssembler::assemble(&request.text, &outputs, start.elapsed());

        let document_id = match &user {
            Some(user) => self.persist(user, &request, &record),
            None => None,
        };

        progress.report(ProgressUpdate::new(100, "Complete!"));
        info!(
            "Simplification complete: {} chunks, complexity {:.1} -> {:.1}, {} ms",
            record.chunk_count,
            record.original_complexity,
            record.simplified_complexity,
            record.processing_time_ms
        );

        Ok(SimplificationResponse {
            record,
            document_id,
        })
    }

    /// Most recent stored documents of the current user, newest first
    ///
    /// Empty when nobody is signed in.
    pub fn history(&self, limit: usize) -> Result<Vec<StoredDocument>, SimplifierError> {
        match self.identity.current_user() {
            Some(user) => self.store_op(|store| store.fetch_history(&user.id, limit)),
            None => Ok(Vec::new()),
        }
    }

    /// Look up a stored document of the current user
    ///
    /// Documents owned by someone else are reported as absent.
    pub fn get_document(&self, id: DocumentId) -> Result<Option<StoredDocument>, SimplifierError> {
        let Some(user) = self.identity.current_user() else {
            return Ok(None);
        };
        self.store_op(|store| store.get_owned_document(&user.id, id))
    }

    /// Usage events of the current user over the last `days` days
    pub fn usage_events(&self, days: u64) -> Result<Vec<UsageEvent>, SimplifierError> {
        let Some(user) = self.identity.current_user() else {
            return Ok(Vec::new());
        };
        self.store_op(|store| store.usage_in_last_days(&user.id, days))
    }

    /// Aggregated usage of the current user over the last `days` days
    pub fn usage_stats(&self, days: u64) -> Result<UsageStats, SimplifierError> {
        Ok(UsageStats::from_events(&self.usage_events(days)?))
    }

    /// Save the record and its `api_call` event, swallowing failures
    fn persist(
        &self,
        user: &UserIdentity,
        request: &SimplificationRequest,
        record: &ResultRecord,
    ) -> Option<DocumentId> {
        let details = request.details();
        let id = best_effort("save document", self.failure_sink.as_ref(), || {
            self.store_op(|store| store.save_document(&user.id, &request.text, &details, record))
        })?;
        debug!("Saved document {}", id);

        let tokens = approximate_tokens(
            request.text.chars().count(),
            record.simplified_text.chars().count(),
        );
        let mut event = UsageEvent::new(&user.id, UsageAction::ApiCall)
            .with_document(id)
            .with_endpoint(&self.endpoint)
            .with_metadata("accuracy", record.accuracy)
            .with_metadata("complexity_reduction", record.complexity_reduction())
            .with_metadata("key_terms", record.key_terms_simplified.len());
        event.processing_time_ms = Some(record.processing_time_ms);
        event.tokens_used = Some(tokens);
        self.track(event);

        Some(id)
    }

    fn track(&self, event: UsageEvent) {
        let label = format!("track {}", event.action.as_str());
        best_effort(&label, self.failure_sink.as_ref(), || {
            self.store_op(|store| store.track_usage(&event))
        });
    }

    fn store_op<T>(
        &self,
        op: impl FnOnce(&mut S) -> Result<T, S::Error>,
    ) -> Result<T, SimplifierError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| SimplifierError::Store("Store lock poisoned".to_string()))?;
        op(&mut store).map_err(|e| SimplifierError::Store(e.to_string()))
    }
}

/// The `text_processing` event recorded before a job starts
fn processing_event(user: &UserIdentity, request: &SimplificationRequest) -> UsageEvent {
    let mut event = UsageEvent::new(&user.id, UsageAction::TextProcessing)
        .with_metadata("word_count", request.text.split_whitespace().count())
        .with_metadata("document_type", request.document_type);
    if let Some(name) = &request.file_name {
        event = event.with_metadata("file_name", name);
    }
    if let Some(size) = request.file_size {
        event = event.with_metadata("file_size", size);
    }
    if let Some(hint) = request.complexity {
        event = event.with_metadata("complexity", hint.as_str());
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_tokens_rounds_up() {
        assert_eq!(approximate_tokens(4, 4), 2);
        assert_eq!(approximate_tokens(5, 0), 2);
        assert_eq!(approximate_tokens(0, 0), 0);
    }

    #[test]
    fn test_processing_event_metadata() {
        let user = UserIdentity::new("user-1");
        let request = SimplificationRequest::new("The lessee shall pay rent monthly.")
            .with_file("lease.txt", 34)
            .with_complexity(crate::types::ComplexityHint::Low);

        let event = processing_event(&user, &request);
        assert_eq!(event.action, UsageAction::TextProcessing);
        assert_eq!(event.metadata["word_count"], "6");
        assert_eq!(event.metadata["document_type"], "legal-document");
        assert_eq!(event.metadata["file_name"], "lease.txt");
        assert_eq!(event.metadata["file_size"], "34");
        assert_eq!(event.metadata["complexity"], "low");
    }
}
