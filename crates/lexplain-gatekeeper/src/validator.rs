//! Text validation logic

use crate::{GatekeeperError, ValidationConfig};
use regex::Regex;
use std::sync::OnceLock;

/// Result of text validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the text passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any), in check order
    pub reasons: Vec<RejectionReason>,
}

impl ValidationResult {
    /// True when no check failed
    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// User-facing messages for every failed check
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(RejectionReason::message).collect()
    }

    /// Convert into a `Result`, carrying all messages on rejection
    pub fn into_result(self) -> Result<(), GatekeeperError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GatekeeperError::Rejected(self.messages()))
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Text accepted
    Accepted,

    /// Text rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Text is empty or whitespace only
    Empty,

    /// Text is shorter than the minimum
    TooShort {
        /// Purpose the text was submitted for
        purpose: String,
        /// Minimum length in characters
        min: usize,
        /// Actual length in characters
        actual: usize,
    },

    /// Text is longer than the maximum
    TooLong {
        /// Maximum length in characters
        max: usize,
        /// Actual length in characters
        actual: usize,
    },

    /// Text contains markup tags
    ContainsMarkup,
}

impl RejectionReason {
    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            RejectionReason::Empty => "Document cannot be empty".to_string(),
            RejectionReason::TooShort { purpose, min, .. } => format!(
                "Document is too short for meaningful {} (minimum {} characters)",
                purpose,
                group_thousands(*min)
            ),
            RejectionReason::TooLong { max, .. } => format!(
                "Document is too long. Please limit to {} characters.",
                group_thousands(*max)
            ),
            RejectionReason::ContainsMarkup => {
                "Document contains HTML tags. Please provide plain text.".to_string()
            }
        }
    }
}

/// Format a number with comma thousands separators
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

/// The Gatekeeper validates text before processing
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with the simplification rules
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate text against the configured rules
    ///
    /// Checks are independent: empty text is also reported as too short.
    pub fn validate(&self, text: &str) -> ValidationResult {
        let mut reasons = Vec::new();
        let length = text.chars().count();

        if text.trim().is_empty() {
            reasons.push(RejectionReason::Empty);
        }

        if length < self.config.min_length {
            reasons.push(RejectionReason::TooShort {
                purpose: self.config.purpose.clone(),
                min: self.config.min_length,
                actual: length,
            });
        }

        if length > self.config.max_length {
            reasons.push(RejectionReason::TooLong {
                max: self.config.max_length,
                actual: length,
            });
        }

        if self.config.reject_markup && markup_pattern().is_match(text) {
            reasons.push(RejectionReason::ContainsMarkup);
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        ValidationResult { status, reasons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal_text(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn test_valid_text() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.validate(&legal_text(200));

        assert!(result.is_valid());
        assert!(result.reasons.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_short_text_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.validate("0123456789");

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert_eq!(result.reasons.len(), 1);
        match &result.reasons[0] {
            RejectionReason::TooShort { min, actual, .. } => {
                assert_eq!(*min, 50);
                assert_eq!(*actual, 10);
            }
            other => panic!("Expected TooShort, got {:?}", other),
        }
        assert!(result.messages()[0].contains("too short"));
    }

    #[test]
    fn test_empty_text_reports_both() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.validate("   ");

        assert_eq!(
            result.messages(),
            vec![
                "Document cannot be empty".to_string(),
                "Document is too short for meaningful simplification (minimum 50 characters)"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_long_text_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let result = gatekeeper.validate(&legal_text(50_001));

        assert_eq!(
            result.messages(),
            vec!["Document is too long. Please limit to 50,000 characters.".to_string()]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::simplification().with_limits(5, 5));
        assert!(gatekeeper.validate("§§§§§").is_valid());
    }

    #[test]
    fn test_markup_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let text = format!("<p>{}</p>", legal_text(100));
        let result = gatekeeper.validate(&text);

        assert_eq!(result.reasons, vec![RejectionReason::ContainsMarkup]);
        match result.into_result() {
            Err(GatekeeperError::Rejected(messages)) => {
                assert!(messages[0].contains("HTML tags"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_verification_rules_allow_markup() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::verification());
        let text = format!("<b>{}</b>", legal_text(150));
        assert!(gatekeeper.validate(&text).is_valid());

        let short = gatekeeper.validate(&legal_text(99));
        assert!(short.messages()[0].contains("authenticity analysis"));
        assert!(short.messages()[0].contains("minimum 100 characters"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(50_000), "50,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
