//! Verification module - persisted outcome of an authenticity check

/// Overall risk attached to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// No meaningful concerns
    Low,
    /// Some concerns worth reviewing
    Medium,
    /// Serious concerns
    High,
    /// Likely fraudulent or unusable
    Critical,
}

impl RiskLevel {
    /// Get the risk level as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Parse a risk level from its wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            "CRITICAL" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

/// Compliance verdict for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceStatus {
    /// All checked requirements met
    Compliant,
    /// Requirements not met
    NonCompliant,
    /// Some requirements met
    PartialCompliance,
}

impl ComplianceStatus {
    /// Get the status as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "COMPLIANT",
            ComplianceStatus::NonCompliant => "NON_COMPLIANT",
            ComplianceStatus::PartialCompliance => "PARTIAL_COMPLIANCE",
        }
    }

    /// Parse a status from its wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "COMPLIANT" => Some(ComplianceStatus::Compliant),
            "NON_COMPLIANT" => Some(ComplianceStatus::NonCompliant),
            "PARTIAL_COMPLIANCE" => Some(ComplianceStatus::PartialCompliance),
            _ => None,
        }
    }
}

/// The part of an authenticity analysis that is kept in storage
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSummary {
    /// Human-facing verification id (`AUTH-...`)
    pub verification_id: String,

    /// Name of the analysed file, if any
    pub file_name: Option<String>,

    /// Authenticity score (0-100)
    pub authenticity_score: f64,

    /// Overall risk
    pub risk_level: RiskLevel,

    /// Whether the document was judged authentic
    pub is_authentic: bool,

    /// Compliance verdict
    pub compliance_status: ComplianceStatus,

    /// Number of fraud indicators raised
    pub fraud_indicator_count: usize,

    /// Whether the heuristic fallback produced this result
    pub fallback: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Full analysis, serialized as JSON
    pub analysis_json: String,

    /// When the analysis was stored (seconds since epoch)
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parse() {
        assert_eq!(RiskLevel::parse("low"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::parse("CRITICAL"), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse("severe"), None);
        assert_eq!(RiskLevel::parse(RiskLevel::High.as_str()), Some(RiskLevel::High));
    }

    #[test]
    fn test_compliance_parse() {
        assert_eq!(
            ComplianceStatus::parse("partial_compliance"),
            Some(ComplianceStatus::PartialCompliance)
        );
        assert_eq!(ComplianceStatus::parse("unknown"), None);
    }
}
