//! Core Verifier implementation

use crate::analysis::{new_verification_id, AuthenticityAnalysis, VerificationRequest};
use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::parser::{parse_or_fallback, AnalysisMode};
use crate::prompt::{build_prompt, REPORT_SCHEMA};
use lexplain_domain::traits::{Anonymous, DocumentStore, IdentityProvider, LlmProvider};
use lexplain_domain::{
    unix_now, DocumentDetails, UsageAction, UsageEvent, UserIdentity, VerificationSummary,
};
use lexplain_gatekeeper::Gatekeeper;
use lexplain_simplifier::{
    best_effort, FailureSink, NoProgress, ProgressSink, ProgressUpdate, TracingSink,
};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Verifier asks the model for an authenticity report on a document
///
/// An unusable model answer does not fail the analysis; the report is then
/// built by the fallback heuristics and marked as such.
pub struct Verifier<L, S>
where
    L: LlmProvider,
    S: DocumentStore,
{
    llm_provider: Arc<L>,
    store: Arc<Mutex<S>>,
    gatekeeper: Gatekeeper,
    config: VerifierConfig,
    identity: Arc<dyn IdentityProvider>,
    failure_sink: Arc<dyn FailureSink>,
    endpoint: String,
}

impl<L, S> Verifier<L, S>
where
    L: LlmProvider + Send + Sync + 'static,
    S: DocumentStore,
{
    /// Create a new Verifier
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration does not validate.
    pub fn new(llm_provider: L, store: S, config: VerifierConfig) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            store: Arc::new(Mutex::new(store)),
            gatekeeper: Gatekeeper::new(config.validation_config()),
            config,
            identity: Arc::new(Anonymous),
            failure_sink: Arc::new(TracingSink),
            endpoint: "llm".to_string(),
        })
    }

    /// Use `identity` to decide who owns persisted analyses
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    /// Report swallowed persistence failures to `sink`
    pub fn with_failure_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.failure_sink = sink;
        self
    }

    /// Label recorded as the endpoint of usage events
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Check `text` against the input rules without analyzing it
    pub fn validate(&self, text: &str) -> Result<(), VerifierError> {
        self.gatekeeper.validate(text).into_result()?;
        Ok(())
    }

    /// Analyze a document
    pub async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<AuthenticityAnalysis, VerifierError> {
        self.verify_with_progress(request, &NoProgress).await
    }

    /// Analyze a document, reporting progress to `progress`
    ///
    /// # Errors
    ///
    /// Returns `Validation` for rejected input, and `Llm` or `Timeout` when the
    /// service cannot be reached. Unparseable answers are not errors.
    pub async fn verify_with_progress(
        &self,
        request: VerificationRequest,
        progress: &dyn ProgressSink,
    ) -> Result<AuthenticityAnalysis, VerifierError> {
        self.validate(&request.text)?;

        let start = Instant::now();
        let verification_id = new_verification_id();
        progress.report(ProgressUpdate::new(10, "Initializing AI analysis..."));

        let user = self.identity.current_user();
        info!(
            "Starting authenticity analysis {}: {} chars",
            verification_id,
            request.text.chars().count()
        );
        if let Some(user) = &user {
            self.track(usage_event(user, &request, &verification_id, &self.endpoint));
        }

        progress.report(ProgressUpdate::new(30, "Analyzing document authenticity..."));
        let prompt = build_prompt(&request.text, request.document_type);

        progress.report(ProgressUpdate::new(50, "Processing with AI models..."));
        let raw = self.call(prompt).await?;
        debug!("Analysis response length: {} chars", raw.len());

        progress.report(ProgressUpdate::new(80, "Generating analysis report..."));
        let (report, mode) = parse_or_fallback(&raw, &request.text);
        if let AnalysisMode::Fallback { reason } = &mode {
            warn!("Using fallback analysis for {}: {}", verification_id, reason);
        }

        progress.report(ProgressUpdate::new(95, "Saving results..."));
        let mut analysis = AuthenticityAnalysis {
            verification_id,
            report,
            mode,
            processing_time_ms: start.elapsed().as_millis() as u64,
            analyzed_at: unix_now(),
            file_name: request.file_name.clone(),
            stored_id: None,
        };
        if let Some(user) = &user {
            analysis.stored_id = best_effort("save verification", self.failure_sink.as_ref(), || {
                let summary = analysis.summary()?;
                self.store_op(|store| store.save_verification(&user.id, &summary))
            });
        }

        progress.report(ProgressUpdate::new(100, "Analysis complete!"));
        info!(
            "Authenticity analysis {} complete: authentic={}, risk {}, {} ms",
            analysis.verification_id,
            analysis.report.authenticity.is_authentic,
            analysis.report.authenticity.risk_level.as_str(),
            analysis.processing_time_ms
        );

        Ok(analysis)
    }

    /// Most recent analyses of the current user, newest first
    ///
    /// Empty when nobody is signed in.
    pub fn history(&self, limit: usize) -> Result<Vec<VerificationSummary>, VerifierError> {
        match self.identity.current_user() {
            Some(user) => self.store_op(|store| store.verification_history(&user.id, limit)),
            None => Ok(Vec::new()),
        }
    }

    async fn call(&self, prompt: String) -> Result<String, VerifierError> {
        let llm = Arc::clone(&self.llm_provider);
        let task = tokio::task::spawn_blocking(move || {
            llm.generate_structured(&prompt, REPORT_SCHEMA)
                .map_err(|e| VerifierError::Llm(e.to_string()))
        });

        match timeout(self.config.call_timeout(), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(VerifierError::Llm(format!("Task join error: {}", e))),
            Err(_) => Err(VerifierError::Timeout(self.config.call_timeout_secs)),
        }
    }

    fn track(&self, event: UsageEvent) {
        best_effort("track document_authenticity_check", self.failure_sink.as_ref(), || {
            self.store_op(|store| store.track_usage(&event))
        });
    }

    fn store_op<T>(
        &self,
        op: impl FnOnce(&mut S) -> Result<T, S::Error>,
    ) -> Result<T, VerifierError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| VerifierError::Store("Store lock poisoned".to_string()))?;
        op(&mut store).map_err(|e| VerifierError::Store(e.to_string()))
    }
}

fn usage_event(
    user: &UserIdentity,
    request: &VerificationRequest,
    verification_id: &str,
    endpoint: &str,
) -> UsageEvent {
    let details = DocumentDetails {
        file_name: request.file_name.clone(),
        file_size: request.file_size,
        document_type: request.document_type,
    };
    let mut event = UsageEvent::new(&user.id, UsageAction::DocumentAuthenticityCheck)
        .with_endpoint(endpoint)
        .with_metadata("verification_id", verification_id)
        .with_metadata("document_type", request.document_type);
    if let Some(name) = &details.file_name {
        event = event.with_metadata("file_name", name);
    }
    if let Some(file_type) = details.file_type() {
        event = event.with_metadata("file_type", file_type);
    }
    if let Some(size) = details.file_size {
        event = event.with_metadata("file_size", size);
    }
    event
}
