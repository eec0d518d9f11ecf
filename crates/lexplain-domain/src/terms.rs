//! Key legal terms and their plain-English replacements

/// An archaic term paired with the wording that replaces it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTerm {
    /// Term as it appears in legal prose
    pub original: String,

    /// Plain-English equivalent
    pub simplified: String,
}

impl KeyTerm {
    /// Create a new key term pair
    pub fn new(original: impl Into<String>, simplified: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            simplified: simplified.into(),
        }
    }
}

/// Maximum number of key terms reported per document
pub const MAX_KEY_TERMS: usize = 5;

/// Lookup table of common legal terms, in reporting order
pub const KEY_TERM_TABLE: &[(&str, &str)] = &[
    ("whereas", "since"),
    ("heretofore", "before this"),
    ("hereinafter", "from now on"),
    ("pursuant to", "according to"),
    ("notwithstanding", "despite"),
    ("aforementioned", "mentioned above"),
    ("hereby", "by this document"),
    ("therein", "in it"),
    ("thereof", "of it"),
    ("hereunder", "under this agreement"),
];

/// Terms from [`KEY_TERM_TABLE`] that appear in `original_text`
///
/// Matching is case-insensitive. Table order is preserved and at most
/// [`MAX_KEY_TERMS`] pairs are returned.
///
/// # Examples
///
/// ```
/// use lexplain_domain::extract_key_terms;
///
/// let terms = extract_key_terms("WHEREAS the tenant hereby agrees");
/// assert_eq!(terms.len(), 2);
/// assert_eq!(terms[0].simplified, "since");
/// ```
pub fn extract_key_terms(original_text: &str) -> Vec<KeyTerm> {
    let lowered = original_text.to_lowercase();
    KEY_TERM_TABLE
        .iter()
        .filter(|(original, _)| lowered.contains(original))
        .take(MAX_KEY_TERMS)
        .map(|(original, simplified)| KeyTerm::new(*original, *simplified))
        .collect()
}
