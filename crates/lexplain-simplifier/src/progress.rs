//! Progress reporting

use std::sync::Mutex;

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Completion percentage (0-100)
    pub percent: u8,

    /// Human-readable status line
    pub status: String,

    /// Rough estimate of seconds remaining
    pub estimated_seconds_remaining: u32,
}

impl ProgressUpdate {
    /// Create an update whose estimate is `100 - percent`
    pub fn new(percent: u8, status: impl Into<String>) -> Self {
        let percent = percent.min(100);
        Self {
            percent,
            status: status.into(),
            estimated_seconds_remaining: u32::from(100 - percent),
        }
    }
}

/// Receiver of progress updates
pub trait ProgressSink: Send + Sync {
    /// Handle one update
    fn report(&self, update: ProgressUpdate);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        self(update)
    }
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _update: ProgressUpdate) {}
}

/// Progress sink that keeps every update
#[derive(Debug, Default)]
pub struct ProgressLog {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl ProgressLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// Status lines received so far
    pub fn statuses(&self) -> Vec<String> {
        self.updates().into_iter().map(|u| u.status).collect()
    }
}

impl ProgressSink for ProgressLog {
    fn report(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update);
        }
    }
}

/// Percentage reported when dispatching chunk `index` of `total`
///
/// Chunk dispatches span 30% to 80%.
pub fn chunk_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 30;
    }
    (30.0 + (index as f64 / total as f64) * 50.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_is_complement() {
        let update = ProgressUpdate::new(35, "Processing part 2 of 3...");
        assert_eq!(update.estimated_seconds_remaining, 65);
        assert_eq!(ProgressUpdate::new(100, "Complete!").estimated_seconds_remaining, 0);
    }

    #[test]
    fn test_chunk_percent() {
        assert_eq!(chunk_percent(0, 1), 30);
        assert_eq!(chunk_percent(0, 3), 30);
        assert_eq!(chunk_percent(1, 3), 47);
        assert_eq!(chunk_percent(2, 3), 63);
    }

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |u: ProgressUpdate| seen.lock().unwrap().push(u.percent);
        sink.report(ProgressUpdate::new(10, "a"));
        sink.report(ProgressUpdate::new(20, "b"));
        assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
    }

    #[test]
    fn test_progress_log() {
        let log = ProgressLog::new();
        log.report(ProgressUpdate::new(10, "Analyzing document structure..."));
        assert_eq!(log.statuses(), vec!["Analyzing document structure..."]);
    }
}
