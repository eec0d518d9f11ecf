//! The authenticity report returned by the model
//!
//! Field names follow the camelCase JSON the prompt asks for. Every field is
//! required; an answer missing one does not match the schema.

use lexplain_domain::{ComplianceStatus, RiskLevel};
use serde::{Deserialize, Serialize};

/// Full authenticity report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Overall authenticity assessment
    pub authenticity: AuthenticityAssessment,

    /// Fraud indicators found
    pub fraud_detection: FraudDetection,

    /// Compliance with standard legal requirements
    pub compliance: ComplianceCheck,

    /// Notable findings
    pub key_findings: Vec<KeyFinding>,

    /// Suggested follow-up actions
    pub recommendations: Vec<Recommendation>,

    /// Facts extracted from the document
    pub document_metadata: DocumentMetadata,
}

/// Overall authenticity assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityAssessment {
    /// Whether the document appears authentic
    pub is_authentic: bool,

    /// Confidence in the assessment (0-100)
    pub confidence_score: f64,

    /// Assessed risk
    #[serde(with = "risk_level")]
    pub risk_level: RiskLevel,

    /// Authenticity score (0-100)
    pub authenticity_score: f64,

    /// Explanation of the assessment
    pub reasoning: String,
}

/// Fraud detection results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudDetection {
    /// Individual indicators
    pub fraud_indicators: Vec<FraudIndicator>,

    /// Overall fraud risk (0-100)
    pub overall_fraud_risk: f64,
}

/// Category of a fraud indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// An expected clause is absent
    MissingClause,
    /// Unusual or suspicious wording
    SuspiciousTerms,
    /// Inconsistent formatting
    FormattingInconsistency,
    /// Problem with signatures
    SignatureAnomaly,
    /// Dates that do not agree
    DateInconsistency,
    /// Parties that do not agree
    PartyMismatch,
}

/// Three-step severity scale used for indicators and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// A single fraud indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudIndicator {
    /// Indicator category
    #[serde(rename = "type")]
    pub kind: IndicatorType,

    /// How serious the indicator is
    pub severity: Severity,

    /// What was found
    pub description: String,

    /// Section or line reference
    pub location: String,

    /// How to address it
    pub suggestion: String,
}

/// Compliance check results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheck {
    /// Overall status
    #[serde(with = "compliance_status")]
    pub compliance_status: ComplianceStatus,

    /// Elements the document lacks
    pub missing_elements: Vec<MissingElement>,

    /// Requirements and whether they are met
    pub legal_requirements: Vec<LegalRequirement>,
}

/// An element the document lacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingElement {
    /// What is missing
    pub element: String,

    /// How important it is
    #[serde(with = "risk_level")]
    pub importance: RiskLevel,

    /// Why it matters
    pub description: String,

    /// How to add or fix it
    pub suggestion: String,
}

/// Whether a requirement is met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementStatus {
    /// Fully met
    Met,
    /// Not met
    NotMet,
    /// Partially met
    Partial,
}

/// A legal requirement and its status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalRequirement {
    /// The requirement
    pub requirement: String,

    /// Whether it is met
    pub status: RequirementStatus,

    /// Explanation
    pub details: String,
}

/// Kind of key finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    /// Affects validity
    Critical,
    /// Worth checking
    Warning,
    /// Informational
    Info,
}

/// A notable finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFinding {
    /// Finding kind
    #[serde(rename = "type")]
    pub kind: FindingType,

    /// Short title
    pub title: String,

    /// Details
    pub description: String,

    /// Impact on document validity
    pub impact: String,
}

/// A suggested follow-up action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Priority
    pub priority: Severity,

    /// What to do
    pub action: String,

    /// Details
    pub description: String,

    /// Expected outcome
    pub estimated_impact: String,
}

/// Facts extracted from the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Parties mentioned
    pub extracted_parties: Vec<String>,

    /// Dates found
    pub extracted_dates: Vec<String>,

    /// Monetary amounts found
    pub extracted_amounts: Vec<String>,

    /// Structural estimate
    pub document_structure: DocumentStructure,
}

/// Structural estimate of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Number of sections
    pub sections: u32,

    /// Number of clauses
    pub clauses: u32,

    /// Estimated number of pages
    pub pages: u32,
}

impl AnalysisReport {
    /// Number of legal requirements reported as met
    pub fn requirements_met(&self) -> usize {
        self.compliance
            .legal_requirements
            .iter()
            .filter(|r| r.status == RequirementStatus::Met)
            .count()
    }
}

mod risk_level {
    use lexplain_domain::RiskLevel;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(level: &RiskLevel, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(level.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RiskLevel, D::Error> {
        let s = String::deserialize(deserializer)?;
        RiskLevel::parse(&s).ok_or_else(|| D::Error::custom(format!("unknown risk level '{}'", s)))
    }
}

mod compliance_status {
    use lexplain_domain::ComplianceStatus;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        status: &ComplianceStatus,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(status.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ComplianceStatus, D::Error> {
        let s = String::deserialize(deserializer)?;
        ComplianceStatus::parse(&s)
            .ok_or_else(|| D::Error::custom(format!("unknown compliance status '{}'", s)))
    }
}
