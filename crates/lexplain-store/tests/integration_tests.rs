//! Integration tests for lexplain-store
//!
//! These tests verify the full cycle for documents, usage events and
//! verification summaries.

use lexplain_domain::traits::DocumentStore;
use lexplain_domain::{
    ComplianceStatus, DocumentDetails, DocumentId, DocumentType, KeyTerm, ResultRecord,
    RiskLevel, UsageAction, UsageEvent, VerificationSummary, SECONDS_PER_DAY,
};
use lexplain_store::{SqliteStore, StoreError};
use tempfile::TempDir;

fn sample_record() -> ResultRecord {
    ResultRecord {
        simplified_text: "The tenant pays rent monthly.".to_string(),
        original_complexity: 72.0,
        simplified_complexity: 18.5,
        accuracy: 97.3,
        processing_time_ms: 4200,
        key_terms_simplified: vec![
            KeyTerm::new("whereas", "since"),
            KeyTerm::new("hereby", "by this document"),
        ],
        chunk_count: 2,
    }
}

fn sample_summary(verification_id: &str, created_at: u64) -> VerificationSummary {
    VerificationSummary {
        verification_id: verification_id.to_string(),
        file_name: Some("lease.pdf".to_string()),
        authenticity_score: 85.0,
        risk_level: RiskLevel::Low,
        is_authentic: true,
        compliance_status: ComplianceStatus::PartialCompliance,
        fraud_indicator_count: 0,
        fallback: true,
        processing_time_ms: 950,
        analysis_json: "{}".to_string(),
        created_at,
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_save_and_get_document() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let details = DocumentDetails {
        file_name: Some("Lease.PDF".to_string()),
        file_size: Some(2048),
        document_type: DocumentType::Contract,
    };
    let record = sample_record();

    let id = store
        .save_document("user-1", "Whereas the lessee hereby agrees.", &details, &record)
        .unwrap();

    let stored = store.get_document(id).unwrap().expect("document should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.owner_id, "user-1");
    assert_eq!(stored.original_text, "Whereas the lessee hereby agrees.");
    assert_eq!(stored.word_count, 5);
    assert_eq!(stored.details, details);
    assert_eq!(stored.record, record);
}

#[test]
fn test_get_missing_document() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(store.get_document(DocumentId::new()).unwrap().is_none());
}

#[test]
fn test_history_is_scoped_and_limited() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let details = DocumentDetails::default();
    let record = sample_record();

    let mut ids = Vec::new();
    for i in 0..4 {
        let text = format!("Document number {}", i);
        ids.push(store.save_document("alice", &text, &details, &record).unwrap());
    }
    store.save_document("bob", "Other owner", &details, &record).unwrap();

    let history = store.fetch_history("alice", 3).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|d| d.owner_id == "alice"));

    assert!(history.iter().all(|d| ids.contains(&d.id)));
    assert!(history.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    assert_eq!(store.fetch_history("carol", 10).unwrap().len(), 0);
    assert_eq!(store.document_count().unwrap(), 5);
}

#[test]
fn test_usage_tracking() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let doc_id = DocumentId::new();

    let mut old = UsageEvent::new("alice", UsageAction::TextProcessing);
    old.created_at = 1_000;
    store.track_usage(&old).unwrap();

    let mut call = UsageEvent::new("alice", UsageAction::ApiCall)
        .with_document(doc_id)
        .with_endpoint("generateContent")
        .with_metadata("accuracy", 97.3);
    call.tokens_used = Some(512);
    call.processing_time_ms = Some(4200);
    call.created_at = 5_000;
    store.track_usage(&call).unwrap();

    let mut other = UsageEvent::new("bob", UsageAction::ApiCall);
    other.created_at = 5_000;
    store.track_usage(&other).unwrap();

    let recent = store.usage_since("alice", 2_000).unwrap();
    assert_eq!(recent, vec![call.clone()]);

    let all = store.usage_since("alice", 0).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].action, UsageAction::ApiCall);
    assert_eq!(all[1].action, UsageAction::TextProcessing);
}

#[test]
fn test_owned_document_lookup() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let id = store
        .save_document(
            "alice",
            "The lessee shall remit rent.",
            &DocumentDetails::default(),
            &sample_record(),
        )
        .unwrap();

    assert!(store.get_owned_document("alice", id).unwrap().is_some());
    assert!(store.get_owned_document("bob", id).unwrap().is_none());
    assert!(store
        .get_owned_document("alice", DocumentId::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_usage_in_last_days_window() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let recent = UsageEvent::new("alice", UsageAction::ApiCall);
    let mut old = UsageEvent::new("alice", UsageAction::TextProcessing);
    old.created_at -= 10 * SECONDS_PER_DAY;
    let other = UsageEvent::new("bob", UsageAction::ApiCall);
    for event in [&recent, &old, &other] {
        store.track_usage(event).unwrap();
    }

    assert_eq!(store.usage_in_last_days("alice", 7).unwrap(), vec![recent]);
    assert_eq!(store.usage_in_last_days("alice", 30).unwrap().len(), 2);
    assert!(store.usage_in_last_days("carol", 30).unwrap().is_empty());
}

#[test]
fn test_verification_round_trip() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .save_verification("alice", &sample_summary("AUTH-1", 100))
        .unwrap();
    store
        .save_verification("alice", &sample_summary("AUTH-2", 200))
        .unwrap();

    let history = store.verification_history("alice", 10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].verification_id, "AUTH-2");
    assert_eq!(history[1], sample_summary("AUTH-1", 100));

    let found = store.get_verification("AUTH-2").unwrap().unwrap();
    assert_eq!(found.compliance_status, ComplianceStatus::PartialCompliance);
    assert!(store.get_verification("AUTH-9").unwrap().is_none());
}

#[test]
fn test_duplicate_verification_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let summary = sample_summary("AUTH-DUP", 1);

    assert!(store.save_verification("alice", &summary).is_ok());
    let result = store.save_verification("alice", &summary);
    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[test]
fn test_persistence_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lexplain.db");

    let id = {
        let mut store = SqliteStore::new(&path).unwrap();
        store
            .save_document("alice", "Persisted text", &DocumentDetails::default(), &sample_record())
            .unwrap()
    };

    let store = SqliteStore::new(&path).unwrap();
    let stored = store.get_document(id).unwrap().unwrap();
    assert_eq!(stored.original_text, "Persisted text");
    assert_eq!(stored.details.document_type, DocumentType::LegalDocument);
}
