//! Result assembly: combine chunk outputs and compute metrics

use lexplain_domain::{complexity_score, extract_key_terms, ResultRecord};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// Separator placed between simplified chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*SIMPLIFIED VERSION:\s*").expect("marker pattern is valid")
    })
}

/// Remove a leading `SIMPLIFIED VERSION:` marker echoed back by the model
pub fn strip_marker(text: &str) -> &str {
    match marker_pattern().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Join chunk outputs in order, dropping echoed markers, and trim
pub fn combine_chunks<S: AsRef<str>>(outputs: &[S]) -> String {
    outputs
        .iter()
        .map(|o| strip_marker(o.as_ref()).trim())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
        .trim()
        .to_string()
}

/// Advisory confidence proxy, rounded to one decimal place
///
/// Rewards keeping most of the length and lowering complexity; capped at 98.5.
pub fn accuracy_estimate(
    original_len: usize,
    simplified_len: usize,
    original_complexity: f64,
    simplified_complexity: f64,
) -> f64 {
    let length_ratio = if original_len == 0 {
        1.0
    } else {
        (simplified_len as f64 / original_len as f64).min(1.0)
    };
    let reduction = (original_complexity - simplified_complexity).max(0.0);
    let accuracy = (95.0 + length_ratio * 3.0 + reduction / 20.0).min(98.5);
    (accuracy * 10.0).round() / 10.0
}

/// Builds the immutable [`ResultRecord`] for a finished job
pub struct ResultAssembler;

impl ResultAssembler {
    /// Assemble the record from the original text and ordered chunk outputs
    pub fn assemble<S: AsRef<str>>(
        original_text: &str,
        outputs: &[S],
        elapsed: Duration,
    ) -> ResultRecord {
        let simplified_text = combine_chunks(outputs);
        let original_complexity = complexity_score(original_text);
        let simplified_complexity = complexity_score(&simplified_text);

        let accuracy = accuracy_estimate(
            original_text.chars().count(),
            simplified_text.chars().count(),
            original_complexity,
            simplified_complexity,
        );

        ResultRecord {
            key_terms_simplified: extract_key_terms(original_text),
            simplified_text,
            original_complexity,
            simplified_complexity,
            accuracy,
            processing_time_ms: elapsed.as_millis() as u64,
            chunk_count: outputs.len(),
        }
    }
}
