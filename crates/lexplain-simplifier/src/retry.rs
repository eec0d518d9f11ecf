//! Retry policy and the injectable sleeper used for waits

use crate::error::FailureKind;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Decides whether a failed chunk call is attempted again
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
    retryable: fn(FailureKind) -> bool,
}

/// Default retry predicate: only rate limits are retried
pub fn rate_limited_only(kind: FailureKind) -> bool {
    kind == FailureKind::RateLimited
}

impl RetryPolicy {
    /// Create a policy retrying rate limits up to `max_attempts` total attempts
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
            retryable: rate_limited_only,
        }
    }

    /// Policy that never retries
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Replace the retry predicate
    pub fn with_retryable(mut self, retryable: fn(FailureKind) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Attempts per chunk, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before each retry
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Whether a failure of `kind` on attempt number `attempt` (1-based) gets another try
    pub fn should_retry(&self, attempt: u32, kind: FailureKind) -> bool {
        attempt < self.max_attempts && (self.retryable)(kind)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(5))
    }
}

/// Source of waits for throttling and backoff
///
/// Production code uses [`TokioSleeper`]; tests inject [`RecordingSleeper`]
/// so that retry paths run without real timers.
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeper backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Sleeper that returns immediately and remembers every requested wait
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recording sleeper
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far, in order
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_retries_rate_limit_once() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(1, FailureKind::RateLimited));
        assert!(!policy.should_retry(2, FailureKind::RateLimited));
    }

    #[test]
    fn test_default_policy_does_not_retry_other_failures() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(1, FailureKind::Timeout));
        assert!(!policy.should_retry(1, FailureKind::Service));
    }

    #[test]
    fn test_custom_predicate() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1))
            .with_retryable(|kind| kind != FailureKind::Service);
        assert!(policy.should_retry(1, FailureKind::Timeout));
        assert!(policy.should_retry(2, FailureKind::RateLimited));
        assert!(!policy.should_retry(3, FailureKind::Timeout));
        assert!(!policy.should_retry(1, FailureKind::Service));
    }

    #[test]
    fn test_no_retry() {
        assert!(!RetryPolicy::no_retry().should_retry(1, FailureKind::RateLimited));
    }

    #[tokio::test]
    async fn test_recording_sleeper() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_millis(500)).await;
        sleeper.sleep(Duration::from_secs(5)).await;
        assert_eq!(
            sleeper.waits(),
            vec![Duration::from_millis(500), Duration::from_secs(5)]
        );
    }
}
