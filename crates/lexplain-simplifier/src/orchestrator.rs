//! Sequential chunk orchestration with bounded retry

use crate::error::{FailureKind, SimplifierError};
use crate::progress::{chunk_percent, ProgressSink, ProgressUpdate};
use crate::prompt::PromptBuilder;
use crate::retry::{RetryPolicy, Sleeper};
use crate::types::ProcessingJob;
use lexplain_domain::traits::{GenerationError, LlmProvider};
use lexplain_domain::DocumentType;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// A failed transformation call
#[derive(Debug, Clone, PartialEq)]
struct CallFailure {
    kind: FailureKind,
    message: String,
}

impl CallFailure {
    fn from_error<E: GenerationError>(error: &E) -> Self {
        let kind = if error.is_rate_limited() {
            FailureKind::RateLimited
        } else if error.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Service
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// Submits chunks to the transformation service one at a time
///
/// Outputs come back in input order. Any chunk that cannot be transformed
/// aborts the whole job; no partial result is produced.
pub struct Orchestrator<'a, L, Z> {
    llm: Arc<L>,
    sleeper: &'a Z,
    policy: RetryPolicy,
    call_timeout: Duration,
    inter_chunk_delay: Duration,
}

impl<'a, L, Z> Orchestrator<'a, L, Z>
where
    L: LlmProvider + Send + Sync + 'static,
    Z: Sleeper,
{
    /// Create a new orchestrator
    pub fn new(
        llm: Arc<L>,
        sleeper: &'a Z,
        policy: RetryPolicy,
        call_timeout: Duration,
        inter_chunk_delay: Duration,
    ) -> Self {
        Self {
            llm,
            sleeper,
            policy,
            call_timeout,
            inter_chunk_delay,
        }
    }

    /// Transform every chunk in order
    ///
    /// # Errors
    ///
    /// Returns `ChunkFailed` naming the first chunk that failed with a
    /// non-retryable error or ran out of attempts.
    pub async fn run(
        &self,
        chunks: Vec<String>,
        document_type: DocumentType,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<String>, SimplifierError> {
        let mut job = ProcessingJob::new(chunks);
        let total = job.total();
        let is_part = job.is_chunked();

        for index in 0..total {
            let percent = chunk_percent(index, total);
            let status = if is_part {
                format!("Processing part {} of {}...", index + 1, total)
            } else {
                "Connecting to AI service...".to_string()
            };
            progress.report(ProgressUpdate::new(percent, status));

            let prompt = PromptBuilder::new(&job.chunks[index], document_type)
                .as_part(is_part)
                .build();
            debug!(
                "Dispatching chunk {}/{} ({} prompt chars)",
                index + 1,
                total,
                prompt.len()
            );

            let output = self.transform_chunk(index, &prompt, percent, progress).await?;
            debug!("Chunk {}/{} returned {} chars", index + 1, total, output.len());
            job.outputs.push(output);

            if index + 1 < total && !self.inter_chunk_delay.is_zero() {
                self.sleeper.sleep(self.inter_chunk_delay).await;
            }
        }

        Ok(job.outputs)
    }

    /// Transform one chunk, retrying while the policy allows
    async fn transform_chunk(
        &self,
        index: usize,
        prompt: &str,
        percent: u8,
        progress: &dyn ProgressSink,
    ) -> Result<String, SimplifierError> {
        let mut attempt = 1;

        loop {
            match self.call(prompt).await {
                Ok(text) => return Ok(text),
                Err(failure) if self.policy.should_retry(attempt, failure.kind) => {
                    let wait = self.policy.backoff();
                    warn!(
                        "Chunk {} attempt {} failed ({}): {}; retrying in {:?}",
                        index + 1,
                        attempt,
                        failure.kind,
                        failure.message,
                        wait
                    );
                    let status = match failure.kind {
                        FailureKind::RateLimited => format!(
                            "Rate limit reached, waiting {} seconds...",
                            wait.as_secs()
                        ),
                        kind => format!("Request {}, waiting {} seconds...", kind, wait.as_secs()),
                    };
                    progress.report(ProgressUpdate::new(percent, status));
                    self.sleeper.sleep(wait).await;
                    attempt += 1;
                }
                Err(failure) => {
                    warn!(
                        "Chunk {} failed after {} attempt(s) ({}): {}",
                        index + 1,
                        attempt,
                        failure.kind,
                        failure.message
                    );
                    return Err(SimplifierError::ChunkFailed {
                        index,
                        attempts: attempt,
                        kind: failure.kind,
                        reason: failure.message,
                    });
                }
            }
        }
    }

    /// Call the provider on the blocking pool, bounded by the call timeout
    async fn call(&self, prompt: &str) -> Result<String, CallFailure> {
        let llm = Arc::clone(&self.llm);
        let prompt = prompt.to_string();

        // LlmProvider is synchronous, so it runs on the blocking pool
        let task = tokio::task::spawn_blocking(move || {
            llm.generate(&prompt).map_err(|e| CallFailure::from_error(&e))
        });

        match timeout(self.call_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(CallFailure {
                kind: FailureKind::Service,
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(CallFailure {
                kind: FailureKind::Timeout,
                message: format!(
                    "No response within {} seconds",
                    self.call_timeout.as_secs()
                ),
            }),
        }
    }
}
