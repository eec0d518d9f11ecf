//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use chrono::{DateTime, Utc};
use colored::*;
use lexplain_domain::{StoredDocument, UsageStats, VerificationSummary};
use lexplain_simplifier::{ProgressSink, ProgressUpdate, SimplificationResponse};
use lexplain_verifier::AuthenticityAnalysis;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a finished simplification.
    pub fn format_simplification(&self, response: &SimplificationResponse) -> Result<String> {
        let record = &response.record;
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "document_id": response.document_id.map(|id| id.to_string()),
                    "simplified_text": record.simplified_text,
                    "original_complexity": record.original_complexity,
                    "simplified_complexity": record.simplified_complexity,
                    "complexity_reduction": record.complexity_reduction(),
                    "accuracy": record.accuracy,
                    "processing_time_ms": record.processing_time_ms,
                    "chunk_count": record.chunk_count,
                    "key_terms": key_terms_json(&record.key_terms_simplified),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(record.simplified_text.clone()),
            OutputFormat::Table => {
                let stored = response
                    .document_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "not saved".to_string());
                let mut out = key_value_table(&[
                    ("Document", stored),
                    ("Parts", record.chunk_count.to_string()),
                    ("Original complexity", format!("{:.0}", record.original_complexity)),
                    ("Simplified complexity", format!("{:.0}", record.simplified_complexity)),
                    ("Reduction", format!("{:.0}", record.complexity_reduction())),
                    ("Accuracy", format!("{:.1}%", record.accuracy)),
                    ("Processing time", format!("{} ms", record.processing_time_ms)),
                ]);
                if !record.key_terms_simplified.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Legal term", "Plain meaning"]);
                    for term in &record.key_terms_simplified {
                        builder.push_record([term.original.as_str(), term.simplified.as_str()]);
                    }
                    out.push_str("\n\n");
                    out.push_str(&styled(builder.build()));
                }
                out.push_str("\n\n");
                out.push_str(&record.simplified_text);
                Ok(out)
            }
        }
    }

    /// Format stored simplifications.
    pub fn format_history(&self, documents: &[StoredDocument]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> =
                    documents.iter().map(document_summary_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(documents
                .iter()
                .map(|d| d.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if documents.is_empty() {
                    return Ok(self.colorize("No documents found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID",
                    "Date",
                    "Type",
                    "File",
                    "Words",
                    "Reduction",
                    "Accuracy",
                ]);
                for doc in documents {
                    builder.push_record([
                        doc.id.to_string(),
                        format_date(doc.created_at),
                        doc.details.document_type.to_string(),
                        doc.details.file_name.clone().unwrap_or_else(|| "-".to_string()),
                        doc.word_count.to_string(),
                        format!("{:.0}", doc.record.complexity_reduction()),
                        format!("{:.1}%", doc.record.accuracy),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format one stored simplification with both texts.
    pub fn format_document(&self, doc: &StoredDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = document_summary_json(doc);
                value["original_text"] = serde_json::json!(doc.original_text);
                value["simplified_text"] = serde_json::json!(doc.record.simplified_text);
                value["key_terms"] = key_terms_json(&doc.record.key_terms_simplified);
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(doc.record.simplified_text.clone()),
            OutputFormat::Table => {
                let mut out = key_value_table(&[
                    ("Document", doc.id.to_string()),
                    ("Date", format_date(doc.created_at)),
                    ("Type", doc.details.document_type.to_string()),
                    (
                        "File",
                        doc.details.file_name.clone().unwrap_or_else(|| "-".to_string()),
                    ),
                    ("Words", doc.word_count.to_string()),
                    ("Original complexity", format!("{:.0}", doc.record.original_complexity)),
                    ("Simplified complexity", format!("{:.0}", doc.record.simplified_complexity)),
                    ("Accuracy", format!("{:.1}%", doc.record.accuracy)),
                ]);
                out.push_str(&format!("\n\n{}\n", self.colorize("Original", "cyan")));
                out.push_str(&doc.original_text);
                out.push_str(&format!("\n\n{}\n", self.colorize("Plain language", "cyan")));
                out.push_str(&doc.record.simplified_text);
                Ok(out)
            }
        }
    }

    /// Format a finished authenticity analysis.
    pub fn format_analysis(&self, analysis: &AuthenticityAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Quiet => Ok(analysis.verification_id.clone()),
            OutputFormat::Table => {
                let report = &analysis.report;
                let authenticity = &report.authenticity;
                let status = if authenticity.is_authentic {
                    self.colorize("AUTHENTIC", "green")
                } else {
                    self.colorize("QUESTIONABLE", "red")
                };
                let mode = if analysis.mode.is_fallback() {
                    "fallback"
                } else {
                    "model"
                };
                let mut out = key_value_table(&[
                    ("Verification ID", analysis.verification_id.clone()),
                    ("Status", status),
                    ("Confidence", format!("{}%", authenticity.confidence_score)),
                    ("Risk level", authenticity.risk_level.as_str().to_string()),
                    ("Authenticity score", format!("{}%", authenticity.authenticity_score)),
                    ("Fraud risk", format!("{}%", report.fraud_detection.overall_fraud_risk)),
                    (
                        "Compliance",
                        report.compliance.compliance_status.as_str().to_string(),
                    ),
                    (
                        "Requirements met",
                        format!(
                            "{}/{}",
                            report.requirements_met(),
                            report.compliance.legal_requirements.len()
                        ),
                    ),
                    ("Analysis", mode.to_string()),
                ]);

                if !report.key_findings.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Finding", "Description"]);
                    for finding in &report.key_findings {
                        builder.push_record([finding.title.as_str(), finding.description.as_str()]);
                    }
                    out.push_str("\n\n");
                    out.push_str(&styled(builder.build()));
                }
                if !report.recommendations.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Priority", "Action", "Description"]);
                    for rec in &report.recommendations {
                        builder.push_record([
                            format!("{:?}", rec.priority).to_uppercase(),
                            rec.action.clone(),
                            rec.description.clone(),
                        ]);
                    }
                    out.push_str("\n\n");
                    out.push_str(&styled(builder.build()));
                }
                Ok(out)
            }
        }
    }

    /// Format stored verification summaries.
    pub fn format_verifications(&self, summaries: &[VerificationSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> =
                    summaries.iter().map(verification_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| s.verification_id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summaries.is_empty() {
                    return Ok(self.colorize("No verifications found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "Verification ID",
                    "Date",
                    "File",
                    "Score",
                    "Risk",
                    "Compliance",
                ]);
                for summary in summaries {
                    builder.push_record([
                        summary.verification_id.clone(),
                        format_date(summary.created_at),
                        summary.file_name.clone().unwrap_or_else(|| "-".to_string()),
                        format!("{}%", summary.authenticity_score),
                        summary.risk_level.as_str().to_string(),
                        summary.compliance_status.as_str().to_string(),
                    ]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format one stored verification.
    ///
    /// JSON output is the full stored analysis.
    pub fn format_verification(&self, summary: &VerificationSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let analysis: serde_json::Value = serde_json::from_str(&summary.analysis_json)?;
                Ok(serde_json::to_string_pretty(&analysis)?)
            }
            OutputFormat::Quiet => Ok(summary.verification_id.clone()),
            OutputFormat::Table => Ok(key_value_table(&[
                ("Verification ID", summary.verification_id.clone()),
                ("Date", format_date(summary.created_at)),
                (
                    "File",
                    summary.file_name.clone().unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "Status",
                    if summary.is_authentic { "AUTHENTIC" } else { "QUESTIONABLE" }.to_string(),
                ),
                ("Authenticity score", format!("{}%", summary.authenticity_score)),
                ("Risk level", summary.risk_level.as_str().to_string()),
                ("Compliance", summary.compliance_status.as_str().to_string()),
                ("Fraud indicators", summary.fraud_indicator_count.to_string()),
                ("Analysis", if summary.fallback { "fallback" } else { "model" }.to_string()),
                ("Processing time", format!("{} ms", summary.processing_time_ms)),
            ])),
        }
    }

    /// Format aggregated usage.
    pub fn format_usage(&self, stats: &UsageStats, days: u64) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "days": days,
                    "total_events": stats.total_events,
                    "text_processing": stats.text_processing,
                    "api_calls": stats.api_calls,
                    "authenticity_checks": stats.authenticity_checks,
                    "tokens_used": stats.tokens_used,
                    "processing_time_ms": stats.processing_time_ms,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(stats.total_events.to_string()),
            OutputFormat::Table => Ok(key_value_table(&[
                ("Period", format!("last {} day(s)", days)),
                ("Events", stats.total_events.to_string()),
                ("Documents submitted", stats.text_processing.to_string()),
                ("Model calls", stats.api_calls.to_string()),
                ("Authenticity checks", stats.authenticity_checks.to_string()),
                ("Tokens (approx.)", stats.tokens_used.to_string()),
                ("Processing time", format!("{} ms", stats.processing_time_ms)),
            ])),
        }
    }

    /// Format the active profile and settings.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        let profile = config.get_active_profile()?;
        let database = profile.database_path()?;
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "active_profile": config.active_profile,
                    "model": profile.model,
                    "endpoint": profile.endpoint,
                    "database": database,
                    "user_id": profile.user_id,
                    "color": config.settings.color,
                    "format": config.settings.format,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(config.active_profile.clone()),
            OutputFormat::Table => Ok(key_value_table(&[
                ("Profile", config.active_profile.clone()),
                ("Model", profile.model.clone().unwrap_or_else(|| "(default)".to_string())),
                (
                    "Endpoint",
                    profile.endpoint.clone().unwrap_or_else(|| "(default)".to_string()),
                ),
                ("Database", database.display().to_string()),
                (
                    "User",
                    profile.user_id.clone().unwrap_or_else(|| "(anonymous)".to_string()),
                ),
                ("Color", config.settings.color.to_string()),
                ("Format", format!("{:?}", config.settings.format).to_lowercase()),
            ])),
        }
    }

    /// Format a progress line.
    pub fn progress_line(&self, update: &ProgressUpdate) -> String {
        let percent = format!("[{:>3}%]", update.percent);
        format!("{} {}", self.colorize(&percent, "cyan"), update.status)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Prints progress updates to stderr, keeping stdout for results.
pub struct StderrProgress<'a> {
    formatter: &'a Formatter,
}

impl<'a> StderrProgress<'a> {
    /// Report through `formatter`.
    pub fn new(formatter: &'a Formatter) -> Self {
        Self { formatter }
    }
}

impl ProgressSink for StderrProgress<'_> {
    fn report(&self, update: ProgressUpdate) {
        if self.formatter.format != OutputFormat::Quiet {
            eprintln!("{}", self.formatter.progress_line(&update));
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn key_value_table(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, value) in rows {
        builder.push_record([field.to_string(), value.clone()]);
    }
    styled(builder.build())
}

/// Render seconds since epoch as a UTC date and time.
pub fn format_date(secs: u64) -> String {
    DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn key_terms_json(terms: &[lexplain_domain::KeyTerm]) -> serde_json::Value {
    terms
        .iter()
        .map(|t| serde_json::json!({ "original": t.original, "simplified": t.simplified }))
        .collect()
}

fn document_summary_json(doc: &StoredDocument) -> serde_json::Value {
    serde_json::json!({
        "id": doc.id.to_string(),
        "created_at": doc.created_at,
        "document_type": doc.details.document_type.as_str(),
        "file_name": doc.details.file_name,
        "file_size": doc.details.file_size,
        "word_count": doc.word_count,
        "original_complexity": doc.record.original_complexity,
        "simplified_complexity": doc.record.simplified_complexity,
        "accuracy": doc.record.accuracy,
        "processing_time_ms": doc.record.processing_time_ms,
        "chunk_count": doc.record.chunk_count,
    })
}

fn verification_json(summary: &VerificationSummary) -> serde_json::Value {
    serde_json::json!({
        "verification_id": summary.verification_id,
        "created_at": summary.created_at,
        "file_name": summary.file_name,
        "authenticity_score": summary.authenticity_score,
        "risk_level": summary.risk_level.as_str(),
        "is_authentic": summary.is_authentic,
        "compliance_status": summary.compliance_status.as_str(),
        "fraud_indicator_count": summary.fraud_indicator_count,
        "fallback": summary.fallback,
        "processing_time_ms": summary.processing_time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexplain_domain::{
        ComplianceStatus, DocumentDetails, DocumentId, DocumentType, KeyTerm, ResultRecord,
        RiskLevel,
    };

    fn record() -> ResultRecord {
        ResultRecord {
            simplified_text: "The tenant pays rent each month.".to_string(),
            original_complexity: 72.0,
            simplified_complexity: 30.0,
            accuracy: 87.3,
            processing_time_ms: 1200,
            key_terms_simplified: vec![KeyTerm::new("whereas", "since")],
            chunk_count: 1,
        }
    }

    fn stored() -> StoredDocument {
        StoredDocument {
            id: DocumentId::new(),
            owner_id: "alice".to_string(),
            original_text: "Whereas the lessee shall remit rent.".to_string(),
            details: DocumentDetails {
                file_name: Some("lease.txt".to_string()),
                file_size: Some(36),
                document_type: DocumentType::Contract,
            },
            word_count: 6,
            record: record(),
            created_at: 1_700_000_000,
        }
    }

    fn summary() -> VerificationSummary {
        VerificationSummary {
            verification_id: "AUTH-LOYW3V28-Q1W2E3".to_string(),
            file_name: None,
            authenticity_score: 91.0,
            risk_level: RiskLevel::Low,
            is_authentic: true,
            compliance_status: ComplianceStatus::Compliant,
            fraud_indicator_count: 0,
            fallback: false,
            processing_time_ms: 800,
            analysis_json: r#"{"verificationId":"AUTH-LOYW3V28-Q1W2E3"}"#.to_string(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_simplification_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let response = SimplificationResponse {
            record: record(),
            document_id: None,
        };
        let output = formatter.format_simplification(&response).unwrap();
        assert!(output.contains("not saved"));
        assert!(output.contains("87.3%"));
        assert!(output.contains("Legal term"));
        assert!(output.ends_with("The tenant pays rent each month."));
    }

    #[test]
    fn test_simplification_quiet_is_text_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let response = SimplificationResponse {
            record: record(),
            document_id: Some(DocumentId::new()),
        };
        let output = formatter.format_simplification(&response).unwrap();
        assert_eq!(output, "The tenant pays rent each month.");
    }

    #[test]
    fn test_simplification_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let response = SimplificationResponse {
            record: record(),
            document_id: None,
        };
        let output = formatter.format_simplification(&response).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["complexity_reduction"], 42.0);
        assert_eq!(value["key_terms"][0]["simplified"], "since");
        assert!(value["document_id"].is_null());
    }

    #[test]
    fn test_history_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_history(&[stored()]).unwrap();
        assert!(output.contains("Reduction"));
        assert!(output.contains("lease.txt"));
        assert!(output.contains("2023-11-14"));
    }

    #[test]
    fn test_empty_history() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_history(&[]).unwrap();
        assert!(output.contains("No documents found"));
    }

    #[test]
    fn test_document_json_includes_texts() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let doc = stored();
        let output = formatter.format_document(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], doc.id.to_string());
        assert_eq!(value["document_type"], "contract");
        assert_eq!(value["original_text"], "Whereas the lessee shall remit rent.");
    }

    #[test]
    fn test_verification_json_is_stored_analysis() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_verification(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["verificationId"], "AUTH-LOYW3V28-Q1W2E3");
    }

    #[test]
    fn test_verifications_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_verifications(&[summary()]).unwrap();
        assert_eq!(output, "AUTH-LOYW3V28-Q1W2E3");
    }

    #[test]
    fn test_usage_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let stats = UsageStats {
            total_events: 3,
            text_processing: 1,
            api_calls: 1,
            authenticity_checks: 1,
            tokens_used: 420,
            processing_time_ms: 2000,
        };
        let output = formatter.format_usage(&stats, 7).unwrap();
        assert!(output.contains("last 7 day(s)"));
        assert!(output.contains("420"));
    }

    #[test]
    fn test_progress_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let line = formatter.progress_line(&ProgressUpdate::new(47, "Processing part 2 of 3..."));
        assert_eq!(line, "[ 47%] Processing part 2 of 3...");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
