//! Plain-text authenticity certificate

use crate::analysis::AuthenticityAnalysis;
use crate::parser::AnalysisMode;
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn analysis_date(secs: u64) -> String {
    DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Render the certificate for a finished analysis
pub fn certificate(analysis: &AuthenticityAnalysis) -> String {
    let report = &analysis.report;
    let authenticity = &report.authenticity;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "DOCUMENT AUTHENTICITY CERTIFICATE");
    let _ = writeln!(out, "===================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Verification ID: {}", analysis.verification_id);
    let _ = writeln!(out, "Analysis Date: {}", analysis_date(analysis.analyzed_at));
    let _ = writeln!(out, "Processing Time: {}ms", analysis.processing_time_ms);
    match &analysis.mode {
        AnalysisMode::Model => {
            let _ = writeln!(out, "Analysis Mode: full model analysis");
        }
        AnalysisMode::Fallback { reason } => {
            let _ = writeln!(out, "Analysis Mode: fallback ({})", reason);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "AUTHENTICITY ASSESSMENT");
    let _ = writeln!(out, "-----------------------");
    let status = if authenticity.is_authentic {
        "AUTHENTIC"
    } else {
        "QUESTIONABLE"
    };
    let _ = writeln!(out, "Status: {}", status);
    let _ = writeln!(out, "Confidence Score: {}%", authenticity.confidence_score);
    let _ = writeln!(out, "Risk Level: {}", authenticity.risk_level.as_str());
    let _ = writeln!(out, "Overall Score: {}%", authenticity.authenticity_score);
    let _ = writeln!(out);

    let _ = writeln!(out, "FRAUD DETECTION SUMMARY");
    let _ = writeln!(out, "-----------------------");
    let _ = writeln!(out, "Overall Risk: {}%", report.fraud_detection.overall_fraud_risk);
    let _ = writeln!(
        out,
        "Indicators Found: {}",
        report.fraud_detection.fraud_indicators.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "COMPLIANCE STATUS");
    let _ = writeln!(out, "-----------------");
    let _ = writeln!(out, "Status: {}", report.compliance.compliance_status.as_str());
    let _ = writeln!(
        out,
        "Missing Elements: {}",
        report.compliance.missing_elements.len()
    );
    let _ = writeln!(
        out,
        "Legal Requirements Met: {}/{}",
        report.requirements_met(),
        report.compliance.legal_requirements.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "KEY FINDINGS");
    let _ = writeln!(out, "------------");
    for finding in &report.key_findings {
        let _ = writeln!(out, "• {}: {}", finding.title, finding.description);
    }
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Quote verification ID {} to confirm this analysis.",
        analysis.verification_id
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{fallback_report, ParseFailure};

    fn analysis() -> AuthenticityAnalysis {
        AuthenticityAnalysis {
            verification_id: "AUTH-LOYW3V28-Q1W2E3".to_string(),
            report: fallback_report("This agreement binds the parties."),
            mode: AnalysisMode::Fallback {
                reason: ParseFailure::NoJsonObject,
            },
            processing_time_ms: 1250,
            analyzed_at: 1_700_000_000,
            file_name: None,
            stored_id: None,
        }
    }

    #[test]
    fn test_certificate_sections() {
        let text = certificate(&analysis());

        assert!(text.starts_with("DOCUMENT AUTHENTICITY CERTIFICATE\n"));
        assert!(text.contains("Verification ID: AUTH-LOYW3V28-Q1W2E3"));
        assert!(text.contains("Analysis Date: 2023-11-14"));
        assert!(text.contains("Processing Time: 1250ms"));
        assert!(text.contains("Analysis Mode: fallback (No JSON object found in response)"));
        assert!(text.contains("Status: QUESTIONABLE"));
        assert!(text.contains("Risk Level: LOW"));
        assert!(text.contains("Status: PARTIAL_COMPLIANCE"));
        assert!(text.contains("Legal Requirements Met: 0/1"));
        assert!(text.contains("• Basic Analysis Completed: "));
        assert!(text.ends_with("to confirm this analysis."));
    }
}
