//! Best-effort side effects
//!
//! Persistence and usage tracking must never fail a simplification. Each such
//! operation runs through [`best_effort`], which hands failures to a
//! [`FailureSink`] and swallows them.

use std::fmt::Display;
use std::sync::Mutex;
use tracing::warn;

/// Observer for swallowed side-effect failures
pub trait FailureSink: Send + Sync {
    /// Record that the operation named `label` failed with `error`
    fn record(&self, label: &str, error: &str);
}

/// Failure sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn record(&self, label: &str, error: &str) {
        warn!(operation = label, error, "Best-effort operation failed");
    }
}

/// Failure sink that keeps every failure, for assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    failures: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(label, error)` pairs
    pub fn failures(&self) -> Vec<(String, String)> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl FailureSink for RecordingSink {
    fn record(&self, label: &str, error: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push((label.to_string(), error.to_string()));
        }
    }
}

/// Run `op`, reporting and discarding any error
///
/// # Examples
///
/// ```
/// use lexplain_simplifier::{best_effort, RecordingSink};
///
/// let sink = RecordingSink::new();
/// let saved: Option<u32> = best_effort("save", &sink, || Err::<u32, _>("disk full"));
/// assert_eq!(saved, None);
/// assert_eq!(sink.failures()[0].1, "disk full");
/// ```
pub fn best_effort<T, E, F>(label: &str, sink: &dyn FailureSink, op: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            sink.record(label, &e.to_string());
            None
        }
    }
}
