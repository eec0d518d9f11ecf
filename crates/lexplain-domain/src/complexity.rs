//! Legal complexity scoring
//!
//! A deterministic heuristic estimating how hard a legal text is to read.
//! The score combines two capped contributions:
//!
//! 1. Sentence length: `min(avg_words_per_sentence * 3, 60)`
//! 2. Jargon density: `min(jargon_occurrences * 5, 40)`
//!
//! The sum is capped at 100. The same function is applied to the original
//! and the simplified text so the difference can be reported as an
//! improvement metric.

/// Archaic or specialist terms that raise the complexity of legal prose
pub const JARGON_TERMS: &[&str] = &[
    "whereas",
    "heretofore",
    "hereinafter",
    "pursuant",
    "notwithstanding",
    "aforementioned",
    "hereby",
    "therein",
    "thereof",
    "hereunder",
    "indemnify",
    "covenant",
    "force majeure",
    "ipso facto",
];

/// Upper bound of the sentence-length contribution
pub const SENTENCE_COMPONENT_CAP: f64 = 60.0;

/// Upper bound of the jargon contribution
pub const JARGON_COMPONENT_CAP: f64 = 40.0;

/// Weight applied to the average number of words per sentence
pub const WORDS_PER_SENTENCE_WEIGHT: f64 = 3.0;

/// Weight applied to each jargon occurrence
pub const JARGON_WEIGHT: f64 = 5.0;

/// Compute the complexity score of `text`, in `[0, 100]`
///
/// Text without any sentence content contributes nothing from the
/// sentence-length component.
///
/// # Examples
///
/// ```
/// use lexplain_domain::complexity_score;
///
/// let plain = complexity_score("You pay rent monthly. We fix the roof.");
/// let legal = complexity_score(
///     "Whereas the lessee, notwithstanding the aforementioned covenant, shall indemnify the lessor.",
/// );
/// assert!(legal > plain);
/// assert!((0.0..=100.0).contains(&legal));
/// ```
pub fn complexity_score(text: &str) -> f64 {
    let sentence_component =
        (average_words_per_sentence(text) * WORDS_PER_SENTENCE_WEIGHT).min(SENTENCE_COMPONENT_CAP);
    let jargon_component = (jargon_count(text) as f64 * JARGON_WEIGHT).min(JARGON_COMPONENT_CAP);

    (sentence_component + jargon_component).min(100.0)
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of sentences, split on runs of `.`, `!` and `?`
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Average words per sentence, or zero when there is no sentence content
pub fn average_words_per_sentence(text: &str) -> f64 {
    let sentences = sentence_count(text);
    if sentences == 0 {
        return 0.0;
    }
    word_count(text) as f64 / sentences as f64
}

/// Total case-insensitive occurrences of every jargon term
pub fn jargon_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    JARGON_TERMS
        .iter()
        .map(|term| lowered.matches(term).count())
        .sum()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scores always fall inside [0, 100]
        #[test]
        fn test_score_bounds(text in ".{0,2000}") {
            let score = complexity_score(&text);
            prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }

        /// Property: scoring is a pure function of its input
        #[test]
        fn test_score_deterministic(text in "[a-zA-Z .!?]{0,500}") {
            prop_assert_eq!(complexity_score(&text), complexity_score(&text));
        }
    }
}
