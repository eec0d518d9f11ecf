//! Document module - simplification results and their stored form

use crate::terms::KeyTerm;
use std::fmt;

/// Unique identifier for a stored document based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, which is what the
/// history listing relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use lexplain_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid document id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Kind of legal document being processed
///
/// Only used to steer the model prompt and to label stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentType {
    /// A contract between parties
    Contract,
    /// A general agreement
    Agreement,
    /// Any other legal document (default)
    #[default]
    LegalDocument,
    /// Terms and conditions of a service
    TermsAndConditions,
    /// Unclassified text
    Other,
}

impl DocumentType {
    /// Get the document type as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::Agreement => "agreement",
            DocumentType::LegalDocument => "legal-document",
            DocumentType::TermsAndConditions => "terms-and-conditions",
            DocumentType::Other => "other",
        }
    }

    /// Parse a document type from its wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "contract" => Some(DocumentType::Contract),
            "agreement" => Some(DocumentType::Agreement),
            "legal-document" => Some(DocumentType::LegalDocument),
            "terms-and-conditions" => Some(DocumentType::TermsAndConditions),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The finalized output of one simplification job
///
/// Created once per completed job and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Plain-English rendition of the whole document
    pub simplified_text: String,

    /// Complexity score of the input text (0-100)
    pub original_complexity: f64,

    /// Complexity score of the simplified text (0-100)
    pub simplified_complexity: f64,

    /// Advisory confidence proxy, one decimal place
    pub accuracy: f64,

    /// Wall-clock time from job start to assembly, in milliseconds
    pub processing_time_ms: u64,

    /// Legal terms found in the original together with their replacements
    pub key_terms_simplified: Vec<KeyTerm>,

    /// Number of chunks the document was processed in
    pub chunk_count: usize,
}

impl ResultRecord {
    /// How much the complexity dropped, never negative
    pub fn complexity_reduction(&self) -> f64 {
        (self.original_complexity - self.simplified_complexity).max(0.0)
    }
}

/// Caller-supplied facts about the source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDetails {
    /// Name of the uploaded file, if the text came from one
    pub file_name: Option<String>,

    /// Size of the uploaded file in bytes
    pub file_size: Option<u64>,

    /// Declared document type
    pub document_type: DocumentType,
}

impl DocumentDetails {
    /// Lowercased extension of the file name, if any
    pub fn file_type(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// A result record as persisted for a user
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Storage identifier
    pub id: DocumentId,

    /// Owner of the record
    pub owner_id: String,

    /// The text that was simplified
    pub original_text: String,

    /// Source details
    pub details: DocumentDetails,

    /// Word count of the original text
    pub word_count: usize,

    /// The simplification outcome
    pub record: ResultRecord,

    /// When the record was stored (seconds since epoch)
    pub created_at: u64,
}
