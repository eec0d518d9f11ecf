//! Parse model output into an [`AnalysisReport`], with a heuristic fallback

use crate::report::{
    AnalysisReport, AuthenticityAssessment, ComplianceCheck, DocumentMetadata, DocumentStructure,
    FindingType, FraudDetection, FraudIndicator, IndicatorType, KeyFinding, LegalRequirement,
    Recommendation, RequirementStatus, Severity,
};
use lexplain_domain::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum word count for a document to be considered complete
const MIN_WORDS: usize = 100;

/// Why a model answer could not be used
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseFailure {
    /// The answer contains no `{...}` span
    #[error("No JSON object found in response")]
    NoJsonObject,

    /// The JSON does not match the report schema
    #[error("Response does not match the report schema: {0}")]
    Schema(String),
}

/// How an analysis was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisMode {
    /// The model's report was used as-is
    Model,

    /// The model's answer was unusable; the report comes from local heuristics
    Fallback {
        /// What was wrong with the model's answer
        reason: ParseFailure,
    },
}

impl AnalysisMode {
    /// True for fallback analyses
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisMode::Fallback { .. })
    }
}

/// The outermost `{...}` span of `raw`, from the first `{` to the last `}`
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a model answer into a report
pub fn parse_report(raw: &str) -> Result<AnalysisReport, ParseFailure> {
    let json = extract_json_object(raw).ok_or(ParseFailure::NoJsonObject)?;
    serde_json::from_str(json).map_err(|e| ParseFailure::Schema(e.to_string()))
}

/// Parse a model answer, falling back to [`fallback_report`] when it is unusable
pub fn parse_or_fallback(raw: &str, text: &str) -> (AnalysisReport, AnalysisMode) {
    match parse_report(raw) {
        Ok(report) => (report, AnalysisMode::Model),
        Err(reason) => (fallback_report(text), AnalysisMode::Fallback { reason }),
    }
}

fn legal_terms_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(whereas|hereby|agreement|party|clause|contract|legal|law|shall|must|required)\b",
        )
        .expect("legal terms pattern is valid")
    })
}

/// Whether `text` uses any common legal vocabulary
pub fn has_legal_terms(text: &str) -> bool {
    legal_terms_pattern().is_match(text)
}

fn ceil_div(words: usize, per: usize) -> u32 {
    words.div_ceil(per) as u32
}

/// Deterministic report built from legal vocabulary and word count alone
pub fn fallback_report(text: &str) -> AnalysisReport {
    let words = text.split_whitespace().count();
    let legal = has_legal_terms(text);

    let fraud_indicators = if words < MIN_WORDS {
        vec![FraudIndicator {
            kind: IndicatorType::FormattingInconsistency,
            severity: Severity::Medium,
            description: "Document appears to be unusually short for a legal document".to_string(),
            location: "Overall document".to_string(),
            suggestion: "Verify document completeness".to_string(),
        }]
    } else {
        Vec::new()
    };

    AnalysisReport {
        authenticity: AuthenticityAssessment {
            is_authentic: legal && words > MIN_WORDS,
            confidence_score: if legal { 75.0 } else { 45.0 },
            risk_level: if legal { RiskLevel::Low } else { RiskLevel::Medium },
            authenticity_score: if legal { 85.0 } else { 60.0 },
            reasoning: "Fallback analysis based on document structure and legal terminology presence"
                .to_string(),
        },
        fraud_detection: FraudDetection {
            fraud_indicators,
            overall_fraud_risk: if legal { 20.0 } else { 50.0 },
        },
        compliance: ComplianceCheck {
            compliance_status: if legal {
                ComplianceStatus::PartialCompliance
            } else {
                ComplianceStatus::NonCompliant
            },
            missing_elements: Vec::new(),
            legal_requirements: vec![LegalRequirement {
                requirement: "Standard legal document structure".to_string(),
                status: if legal {
                    RequirementStatus::Partial
                } else {
                    RequirementStatus::NotMet
                },
                details: "Document structure analysis completed with limited AI processing"
                    .to_string(),
            }],
        },
        key_findings: vec![KeyFinding {
            kind: FindingType::Info,
            title: "Basic Analysis Completed".to_string(),
            description: "Document was analyzed using fallback method due to processing limitations"
                .to_string(),
            impact: "Analysis may have reduced accuracy compared to full AI processing".to_string(),
        }],
        recommendations: vec![Recommendation {
            priority: Severity::Medium,
            action: "Re-analyze with full AI processing".to_string(),
            description: "For more accurate results, try submitting the document again".to_string(),
            estimated_impact: "Improved accuracy and detailed insights".to_string(),
        }],
        document_metadata: DocumentMetadata {
            extracted_parties: Vec::new(),
            extracted_dates: Vec::new(),
            extracted_amounts: Vec::new(),
            document_structure: DocumentStructure {
                sections: ceil_div(words, 200),
                clauses: ceil_div(words, 100),
                pages: ceil_div(words, 300),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_REPORT: &str = r#"{
        "authenticity": {
            "isAuthentic": true,
            "confidenceScore": 92,
            "riskLevel": "LOW",
            "authenticityScore": 94.5,
            "reasoning": "Consistent structure and terminology"
        },
        "fraudDetection": {
            "fraudIndicators": [{
                "type": "missing_clause",
                "severity": "LOW",
                "description": "No governing law clause",
                "location": "End of document",
                "suggestion": "Add a governing law clause"
            }],
            "overallFraudRisk": 8
        },
        "compliance": {
            "complianceStatus": "PARTIAL_COMPLIANCE",
            "missingElements": [{
                "element": "Governing law",
                "importance": "MEDIUM",
                "description": "Determines applicable law",
                "suggestion": "Name a jurisdiction"
            }],
            "legalRequirements": [
                {"requirement": "Identified parties", "status": "MET", "details": "Both named"},
                {"requirement": "Signatures", "status": "PARTIAL", "details": "One missing"}
            ]
        },
        "keyFindings": [{
            "type": "warning",
            "title": "Unsigned",
            "description": "Tenant signature absent",
            "impact": "May not be enforceable"
        }],
        "recommendations": [{
            "priority": "HIGH",
            "action": "Obtain signature",
            "description": "Have the tenant sign",
            "estimatedImpact": "Enforceable agreement"
        }],
        "documentMetadata": {
            "extractedParties": ["Acme Ltd", "Jane Doe"],
            "extractedDates": ["1 March 2024"],
            "extractedAmounts": ["$1,200"],
            "documentStructure": {"sections": 4, "clauses": 12, "pages": 2}
        }
    }"#;

    #[test]
    fn test_parse_wrapped_report() {
        let raw = format!("Here is the analysis:\n```json\n{}\n```", MODEL_REPORT);
        let report = parse_report(&raw).unwrap();
        assert!(report.authenticity.is_authentic);
        assert_eq!(report.authenticity.risk_level, RiskLevel::Low);
        assert_eq!(report.compliance.compliance_status, ComplianceStatus::PartialCompliance);
        assert_eq!(report.compliance.missing_elements[0].importance, RiskLevel::Medium);
        assert_eq!(report.requirements_met(), 1);
        assert_eq!(report.document_metadata.document_structure.clauses, 12);
    }

    #[test]
    fn test_no_json_object() {
        assert_eq!(
            parse_report("I cannot analyze this document."),
            Err(ParseFailure::NoJsonObject)
        );
        assert_eq!(parse_report("} backwards {"), Err(ParseFailure::NoJsonObject));
    }

    #[test]
    fn test_schema_mismatch() {
        let result = parse_report(r#"{"authenticity": {"isAuthentic": "yes"}}"#);
        assert!(matches!(result, Err(ParseFailure::Schema(_))));
    }

    #[test]
    fn test_fallback_for_short_legal_text() {
        let text = "This agreement is made between the landlord and the tenant.";
        let (report, mode) = parse_or_fallback("no json here", text);

        assert_eq!(
            mode,
            AnalysisMode::Fallback {
                reason: ParseFailure::NoJsonObject
            }
        );
        assert!(!report.authenticity.is_authentic);
        assert_eq!(report.authenticity.confidence_score, 75.0);
        assert_eq!(report.authenticity.risk_level, RiskLevel::Low);
        assert_eq!(report.fraud_detection.fraud_indicators.len(), 1);
        assert_eq!(report.fraud_detection.overall_fraud_risk, 20.0);
        assert_eq!(report.compliance.compliance_status, ComplianceStatus::PartialCompliance);
        assert_eq!(
            report.document_metadata.document_structure,
            DocumentStructure {
                sections: 1,
                clauses: 1,
                pages: 1
            }
        );
    }

    #[test]
    fn test_fallback_for_long_legal_text() {
        let text = format!("The tenant shall pay rent. {}", "word ".repeat(250));
        let report = fallback_report(&text);

        assert!(report.authenticity.is_authentic);
        assert_eq!(report.authenticity.authenticity_score, 85.0);
        assert!(report.fraud_detection.fraud_indicators.is_empty());
        assert_eq!(
            report.document_metadata.document_structure,
            DocumentStructure {
                sections: 2,
                clauses: 3,
                pages: 1
            }
        );
    }

    #[test]
    fn test_fallback_without_legal_terms() {
        let report = fallback_report(&"banana ".repeat(150));
        assert!(!report.authenticity.is_authentic);
        assert_eq!(report.authenticity.confidence_score, 45.0);
        assert_eq!(report.authenticity.risk_level, RiskLevel::Medium);
        assert_eq!(report.compliance.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(
            report.compliance.legal_requirements[0].status,
            RequirementStatus::NotMet
        );
    }

    #[test]
    fn test_legal_terms_are_word_bounded() {
        assert!(has_legal_terms("The Parties SHALL comply."));
        assert!(!has_legal_terms("Lawn care and partying."));
    }
}
