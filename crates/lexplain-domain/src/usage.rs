//! Usage tracking events

use crate::DocumentId;
use std::collections::BTreeMap;

/// What a usage event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageAction {
    /// A document was uploaded
    DocumentUpload,
    /// Text was submitted for simplification
    TextProcessing,
    /// A result was downloaded
    ResultDownload,
    /// The generative-language service was called for a stored document
    ApiCall,
    /// An authenticity check was run
    DocumentAuthenticityCheck,
}

impl UsageAction {
    /// Get the action name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageAction::DocumentUpload => "document_upload",
            UsageAction::TextProcessing => "text_processing",
            UsageAction::ResultDownload => "result_download",
            UsageAction::ApiCall => "api_call",
            UsageAction::DocumentAuthenticityCheck => "document_authenticity_check",
        }
    }

    /// Parse an action from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "document_upload" => Some(UsageAction::DocumentUpload),
            "text_processing" => Some(UsageAction::TextProcessing),
            "result_download" => Some(UsageAction::ResultDownload),
            "api_call" => Some(UsageAction::ApiCall),
            "document_authenticity_check" => Some(UsageAction::DocumentAuthenticityCheck),
            _ => None,
        }
    }
}

/// One tracked action of a signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct UsageEvent {
    /// Owner of the event
    pub owner_id: String,

    /// What happened
    pub action: UsageAction,

    /// Stored document the event relates to
    pub document_id: Option<DocumentId>,

    /// Service endpoint involved, if any
    pub api_endpoint: Option<String>,

    /// Processing time in milliseconds
    pub processing_time_ms: Option<u64>,

    /// Approximate tokens consumed
    pub tokens_used: Option<u64>,

    /// Free-form details
    pub metadata: BTreeMap<String, String>,

    /// When the event happened (seconds since epoch)
    pub created_at: u64,
}

impl UsageEvent {
    /// Create an event stamped with the current time
    pub fn new(owner_id: impl Into<String>, action: UsageAction) -> Self {
        Self {
            owner_id: owner_id.into(),
            action,
            document_id: None,
            api_endpoint: None,
            processing_time_ms: None,
            tokens_used: None,
            metadata: BTreeMap::new(),
            created_at: crate::unix_now(),
        }
    }

    /// Relate the event to a stored document
    pub fn with_document(mut self, id: DocumentId) -> Self {
        self.document_id = Some(id);
        self
    }

    /// Record the endpoint that was called
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip() {
        for action in [
            UsageAction::DocumentUpload,
            UsageAction::TextProcessing,
            UsageAction::ResultDownload,
            UsageAction::ApiCall,
            UsageAction::DocumentAuthenticityCheck,
        ] {
            assert_eq!(UsageAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(UsageAction::parse("billing"), None);
    }

    #[test]
    fn test_builder() {
        let id = DocumentId::new();
        let event = UsageEvent::new("user-1", UsageAction::ApiCall)
            .with_document(id)
            .with_metadata("accuracy", 97.5);

        assert_eq!(event.document_id, Some(id));
        assert_eq!(event.metadata.get("accuracy").map(String::as_str), Some("97.5"));
        assert!(event.created_at > 0);
    }
}
