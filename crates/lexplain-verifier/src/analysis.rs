//! Request and result types for authenticity analysis

use crate::error::VerifierError;
use crate::parser::AnalysisMode;
use crate::report::AnalysisReport;
use lexplain_domain::{DocumentId, DocumentType, VerificationSummary};
use rand::Rng;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uppercase base-36 rendering of `n`
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// New verification id: `AUTH-<base36 millis>-<6 random base36 chars>`
pub fn new_verification_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("AUTH-{}-{}", to_base36(millis), suffix)
}

/// Request to analyze a document
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// Document text
    pub text: String,

    /// Declared document type
    pub document_type: DocumentType,

    /// Name of the source file, if any
    pub file_name: Option<String>,

    /// Size of the source file in bytes, if any
    pub file_size: Option<u64>,
}

impl VerificationRequest {
    /// Create a request with default document type and no file details
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document_type: DocumentType::default(),
            file_name: None,
            file_size: None,
        }
    }

    /// Set the document type
    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    /// Attach source file details
    pub fn with_file(mut self, file_name: impl Into<String>, file_size: u64) -> Self {
        self.file_name = Some(file_name.into());
        self.file_size = Some(file_size);
        self
    }
}

/// A finished authenticity analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityAnalysis {
    /// Verification id, also used on the certificate
    pub verification_id: String,

    /// The report
    pub report: AnalysisReport,

    /// Whether the report came from the model or the fallback heuristics
    pub mode: AnalysisMode,

    /// Wall-clock time of the analysis in milliseconds
    pub processing_time_ms: u64,

    /// When the analysis finished (seconds since epoch)
    pub analyzed_at: u64,

    /// Name of the source file, if any
    pub file_name: Option<String>,

    /// Storage id, present only when the summary was persisted
    #[serde(skip)]
    pub stored_id: Option<DocumentId>,
}

impl AuthenticityAnalysis {
    /// Storable summary of this analysis, with the full analysis as JSON
    pub fn summary(&self) -> Result<VerificationSummary, VerifierError> {
        Ok(VerificationSummary {
            verification_id: self.verification_id.clone(),
            file_name: self.file_name.clone(),
            authenticity_score: self.report.authenticity.authenticity_score,
            risk_level: self.report.authenticity.risk_level,
            is_authentic: self.report.authenticity.is_authentic,
            compliance_status: self.report.compliance.compliance_status,
            fraud_indicator_count: self.report.fraud_detection.fraud_indicators.len(),
            fallback: self.mode.is_fallback(),
            processing_time_ms: self.processing_time_ms,
            analysis_json: serde_json::to_string(self)?,
            created_at: self.analyzed_at,
        })
    }
}
