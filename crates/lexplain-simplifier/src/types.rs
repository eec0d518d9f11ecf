//! Request and response types for simplification

use lexplain_domain::{DocumentDetails, DocumentId, DocumentType, ResultRecord};

/// Caller's hint about how complex the input is
///
/// Recorded with usage events; it does not change processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityHint {
    /// Dense legal prose
    High,
    /// Ordinary contract language
    Medium,
    /// Mostly plain text already
    Low,
}

impl ComplexityHint {
    /// Get the hint as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityHint::High => "high",
            ComplexityHint::Medium => "medium",
            ComplexityHint::Low => "low",
        }
    }

    /// Parse a hint from its wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(ComplexityHint::High),
            "medium" => Some(ComplexityHint::Medium),
            "low" => Some(ComplexityHint::Low),
            _ => None,
        }
    }
}

/// Request to simplify a document
#[derive(Debug, Clone)]
pub struct SimplificationRequest {
    /// Text to simplify
    pub text: String,

    /// Declared document type, used in the prompt
    pub document_type: DocumentType,

    /// Optional complexity hint
    pub complexity: Option<ComplexityHint>,

    /// Name of the source file, if any
    pub file_name: Option<String>,

    /// Size of the source file in bytes, if any
    pub file_size: Option<u64>,
}

impl SimplificationRequest {
    /// Create a request with default document type and no file details
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document_type: DocumentType::default(),
            complexity: None,
            file_name: None,
            file_size: None,
        }
    }

    /// Set the document type
    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    /// Set the complexity hint
    pub fn with_complexity(mut self, complexity: ComplexityHint) -> Self {
        self.complexity = Some(complexity);
        self
    }

    /// Attach source file details
    pub fn with_file(mut self, file_name: impl Into<String>, file_size: u64) -> Self {
        self.file_name = Some(file_name.into());
        self.file_size = Some(file_size);
        self
    }

    /// Details stored alongside the result
    pub fn details(&self) -> DocumentDetails {
        DocumentDetails {
            file_name: self.file_name.clone(),
            file_size: self.file_size,
            document_type: self.document_type,
        }
    }
}

/// Result of a simplification
#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationResponse {
    /// The finalized record
    pub record: ResultRecord,

    /// Storage id, present only when the record was persisted
    pub document_id: Option<DocumentId>,
}

/// In-flight state of one job: the chunks and the outputs gathered so far
#[derive(Debug, Default)]
pub(crate) struct ProcessingJob {
    pub(crate) chunks: Vec<String>,
    pub(crate) outputs: Vec<String>,
}

impl ProcessingJob {
    pub(crate) fn new(chunks: Vec<String>) -> Self {
        let outputs = Vec::with_capacity(chunks.len());
        Self { chunks, outputs }
    }

    pub(crate) fn total(&self) -> usize {
        self.chunks.len()
    }

    pub(crate) fn is_chunked(&self) -> bool {
        self.chunks.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = SimplificationRequest::new("text")
            .with_document_type(DocumentType::Contract)
            .with_complexity(ComplexityHint::High)
            .with_file("lease.docx", 1024);

        let details = request.details();
        assert_eq!(details.document_type, DocumentType::Contract);
        assert_eq!(details.file_type().as_deref(), Some("docx"));
        assert_eq!(request.complexity, Some(ComplexityHint::High));
    }

    #[test]
    fn test_complexity_hint_parse() {
        assert_eq!(ComplexityHint::parse("Medium"), Some(ComplexityHint::Medium));
        assert_eq!(ComplexityHint::parse("extreme"), None);
    }
}
