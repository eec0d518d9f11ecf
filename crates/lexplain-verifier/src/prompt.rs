//! Prompt for authenticity analysis

use lexplain_domain::DocumentType;

/// JSON layout the model is asked to answer with
pub const REPORT_SCHEMA: &str = r#"{
  "authenticity": {
    "isAuthentic": boolean,
    "confidenceScore": number (0-100),
    "riskLevel": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
    "authenticityScore": number (0-100),
    "reasoning": "string explaining the authenticity assessment"
  },
  "fraudDetection": {
    "fraudIndicators": [
      {
        "type": "missing_clause" | "suspicious_terms" | "formatting_inconsistency" | "signature_anomaly" | "date_inconsistency" | "party_mismatch",
        "severity": "LOW" | "MEDIUM" | "HIGH",
        "description": "detailed description of the issue",
        "location": "section or line reference",
        "suggestion": "how to address this issue"
      }
    ],
    "overallFraudRisk": number (0-100)
  },
  "compliance": {
    "complianceStatus": "COMPLIANT" | "NON_COMPLIANT" | "PARTIAL_COMPLIANCE",
    "missingElements": [
      {
        "element": "what is missing",
        "importance": "CRITICAL" | "HIGH" | "MEDIUM" | "LOW",
        "description": "why this is important",
        "suggestion": "how to add or fix this"
      }
    ],
    "legalRequirements": [
      {
        "requirement": "specific legal requirement",
        "status": "MET" | "NOT_MET" | "PARTIAL",
        "details": "explanation of requirement status"
      }
    ]
  },
  "keyFindings": [
    {
      "type": "critical" | "warning" | "info",
      "title": "brief title of finding",
      "description": "detailed description",
      "impact": "potential impact on document validity"
    }
  ],
  "recommendations": [
    {
      "priority": "HIGH" | "MEDIUM" | "LOW",
      "action": "what action to take",
      "description": "detailed recommendation",
      "estimatedImpact": "expected outcome of following this recommendation"
    }
  ],
  "documentMetadata": {
    "extractedParties": ["list of parties mentioned"],
    "extractedDates": ["list of dates found"],
    "extractedAmounts": ["list of monetary amounts found"],
    "documentStructure": {
      "sections": integer,
      "clauses": integer,
      "pages": integer
    }
  }
}"#;

const FOCUS: &str = "Focus on:
1. Document structure and formatting consistency
2. Legal language appropriateness and accuracy
3. Missing critical clauses or elements
4. Suspicious or unusual terms
5. Date and party consistency
6. Compliance with standard legal document requirements
7. Potential fraud indicators or red flags

Provide specific, actionable insights.";

/// Build the analysis prompt for `text`
///
/// The JSON layout is passed separately as the structured-output schema.
pub fn build_prompt(text: &str, document_type: DocumentType) -> String {
    format!(
        "You are an expert legal document authenticity checker. Analyze the following {} \
         for authenticity, fraud indicators, and compliance issues.\n\n\
         DOCUMENT CONTENT:\n{}\n\n\
         Respond with a single JSON object using exactly the field names and values of the schema.\n\n\
         {}",
        document_type, text, FOCUS
    )
}
