//! Integration tests for the Verifier

#[cfg(test)]
mod tests {
    use crate::{
        certificate, AnalysisMode, ParseFailure, VerificationRequest, Verifier, VerifierConfig,
        VerifierError,
    };
    use lexplain_domain::traits::{DocumentStore, StaticIdentity};
    use lexplain_domain::{
        DocumentDetails, DocumentId, DocumentType, ResultRecord, RiskLevel, StoredDocument,
        UsageEvent, UserIdentity, VerificationSummary,
    };
    use lexplain_llm::{LlmError, MockProvider};
    use lexplain_simplifier::{ProgressLog, RecordingSink};
    use lexplain_store::SqliteStore;
    use std::io;
    use std::sync::Arc;

    const LEASE: &str = "This lease agreement is made between Acme Properties Ltd (the landlord) \
        and Jane Doe (the tenant). The tenant shall pay rent of $1,200 on the first day of each \
        month. Either party may terminate this agreement with thirty days written notice.";

    const MODEL_REPORT: &str = r#"Sure. Here is my analysis:
    {
        "authenticity": {
            "isAuthentic": true,
            "confidenceScore": 88,
            "riskLevel": "LOW",
            "authenticityScore": 91,
            "reasoning": "Standard residential lease language"
        },
        "fraudDetection": {"fraudIndicators": [], "overallFraudRisk": 5},
        "compliance": {
            "complianceStatus": "COMPLIANT",
            "missingElements": [],
            "legalRequirements": [
                {"requirement": "Identified parties", "status": "MET", "details": "Both named"}
            ]
        },
        "keyFindings": [{
            "type": "info",
            "title": "Clear terms",
            "description": "Rent and notice period stated",
            "impact": "None"
        }],
        "recommendations": [],
        "documentMetadata": {
            "extractedParties": ["Acme Properties Ltd", "Jane Doe"],
            "extractedDates": [],
            "extractedAmounts": ["$1,200"],
            "documentStructure": {"sections": 1, "clauses": 3, "pages": 1}
        }
    }"#;

    fn verifier(llm: &MockProvider) -> Verifier<MockProvider, SqliteStore> {
        Verifier::new(
            llm.clone(),
            SqliteStore::new(":memory:").unwrap(),
            VerifierConfig::default(),
        )
        .unwrap()
    }

    fn signed_in(id: &str) -> Arc<StaticIdentity> {
        Arc::new(StaticIdentity(UserIdentity::new(id)))
    }

    /// Store whose writes always fail
    struct FailingStore;

    fn unavailable() -> io::Error {
        io::Error::other("database unavailable")
    }

    impl DocumentStore for FailingStore {
        type Error = io::Error;

        fn save_document(
            &mut self,
            _owner_id: &str,
            _original_text: &str,
            _details: &DocumentDetails,
            _record: &ResultRecord,
        ) -> Result<DocumentId, Self::Error> {
            Err(unavailable())
        }

        fn fetch_history(
            &self,
            _owner_id: &str,
            _limit: usize,
        ) -> Result<Vec<StoredDocument>, Self::Error> {
            Err(unavailable())
        }

        fn get_document(&self, _id: DocumentId) -> Result<Option<StoredDocument>, Self::Error> {
            Err(unavailable())
        }

        fn track_usage(&mut self, _event: &UsageEvent) -> Result<(), Self::Error> {
            Err(unavailable())
        }

        fn usage_since(
            &self,
            _owner_id: &str,
            _since: u64,
        ) -> Result<Vec<UsageEvent>, Self::Error> {
            Err(unavailable())
        }

        fn save_verification(
            &mut self,
            _owner_id: &str,
            _summary: &VerificationSummary,
        ) -> Result<DocumentId, Self::Error> {
            Err(unavailable())
        }

        fn verification_history(
            &self,
            _owner_id: &str,
            _limit: usize,
        ) -> Result<Vec<VerificationSummary>, Self::Error> {
            Err(unavailable())
        }
    }

    #[tokio::test]
    async fn test_model_report_is_used() {
        let llm = MockProvider::new(MODEL_REPORT);
        let log = ProgressLog::new();

        let analysis = verifier(&llm)
            .verify_with_progress(
                VerificationRequest::new(LEASE).with_document_type(DocumentType::Contract),
                &log,
            )
            .await
            .unwrap();

        assert_eq!(analysis.mode, AnalysisMode::Model);
        assert!(analysis.report.authenticity.is_authentic);
        assert_eq!(analysis.report.authenticity.risk_level, RiskLevel::Low);
        assert_eq!(
            analysis.report.document_metadata.extracted_parties,
            vec!["Acme Properties Ltd", "Jane Doe"]
        );
        assert!(analysis.verification_id.starts_with("AUTH-"));
        assert_eq!(analysis.stored_id, None);

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Analyze the following contract"));
        assert!(prompt.contains(LEASE));

        let percents: Vec<u8> = log.updates().iter().map(|u| u.percent).collect();
        assert_eq!(percents, vec![10, 30, 50, 80, 95, 100]);
        assert_eq!(log.statuses().last().map(String::as_str), Some("Analysis complete!"));
    }

    #[tokio::test]
    async fn test_prose_answer_falls_back() {
        let llm = MockProvider::new("I am unable to assess this document.");

        let analysis = verifier(&llm)
            .verify(VerificationRequest::new(LEASE))
            .await
            .unwrap();

        assert_eq!(
            analysis.mode,
            AnalysisMode::Fallback {
                reason: ParseFailure::NoJsonObject
            }
        );
        // Legal vocabulary present but fewer than 100 words
        assert!(!analysis.report.authenticity.is_authentic);
        assert_eq!(analysis.report.authenticity.confidence_score, 75.0);
        assert_eq!(analysis.report.fraud_detection.fraud_indicators.len(), 1);
        assert_eq!(
            analysis.report.key_findings[0].title,
            "Basic Analysis Completed"
        );
    }

    #[tokio::test]
    async fn test_schema_mismatch_falls_back() {
        let llm = MockProvider::new(
            r#"{"authenticity": {"isAuthentic": true, "riskLevel": "SEVERE"}}"#,
        );

        let analysis = verifier(&llm)
            .verify(VerificationRequest::new(LEASE))
            .await
            .unwrap();

        assert!(matches!(
            analysis.mode,
            AnalysisMode::Fallback {
                reason: ParseFailure::Schema(_)
            }
        ));
        assert!(certificate(&analysis).contains("Analysis Mode: fallback"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let llm = MockProvider::failing(LlmError::Communication("connection refused".to_string()));

        let err = verifier(&llm)
            .verify(VerificationRequest::new(LEASE))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            VerifierError::Llm("Communication error: connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_short_document_rejected_before_analysis() {
        let llm = MockProvider::new(MODEL_REPORT);

        let err = verifier(&llm)
            .verify(VerificationRequest::new("This agreement is short."))
            .await
            .unwrap_err();

        assert_eq!(
            err.messages(),
            vec!["Document is too short for meaningful authenticity analysis (minimum 100 characters)"]
        );
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_signed_in_analysis_is_saved() {
        let llm = MockProvider::new(MODEL_REPORT);
        let verifier = verifier(&llm).with_identity(signed_in("user-1"));

        let analysis = verifier
            .verify(VerificationRequest::new(LEASE).with_file("lease.txt", 250))
            .await
            .unwrap();
        assert!(analysis.stored_id.is_some());

        let history = verifier.history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].verification_id, analysis.verification_id);
        assert_eq!(history[0].file_name.as_deref(), Some("lease.txt"));
        assert_eq!(history[0].authenticity_score, 91.0);
        assert!(!history[0].fallback);
        assert!(history[0].analysis_json.contains("\"extractedAmounts\":[\"$1,200\"]"));
    }

    #[tokio::test]
    async fn test_failing_store_still_yields_analysis() {
        let sink = Arc::new(RecordingSink::new());
        let verifier = Verifier::new(
            MockProvider::new(MODEL_REPORT),
            FailingStore,
            VerifierConfig::default(),
        )
        .unwrap()
        .with_identity(signed_in("user-1"))
        .with_failure_sink(sink.clone());

        let analysis = verifier
            .verify(VerificationRequest::new(LEASE))
            .await
            .unwrap();

        assert_eq!(analysis.stored_id, None);
        assert_eq!(analysis.mode, AnalysisMode::Model);
        let labels: Vec<String> = sink.failures().into_iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            vec!["track document_authenticity_check", "save verification"]
        );
    }

    #[tokio::test]
    async fn test_anonymous_history_is_empty() {
        let verifier = verifier(&MockProvider::new(MODEL_REPORT));
        verifier.verify(VerificationRequest::new(LEASE)).await.unwrap();
        assert!(verifier.history(10).unwrap().is_empty());
    }
}
