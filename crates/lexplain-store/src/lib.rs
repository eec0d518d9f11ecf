//! Lexplain Storage Layer
//!
//! Implements the `DocumentStore` trait on top of SQLite.
//!
//! # Tables
//!
//! - `documents`: completed simplifications with their metrics and key terms
//! - `usage_events`: per-user usage tracking
//! - `verifications`: authenticity check summaries
//!
//! # Examples
//!
//! ```no_run
//! use lexplain_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for document operations
//! ```

#![warn(missing_docs)]

use lexplain_domain::traits::DocumentStore;
use lexplain_domain::{
    ComplianceStatus, DocumentDetails, DocumentId, DocumentType, KeyTerm, ResultRecord,
    RiskLevel, StoredDocument, UsageAction, UsageEvent, VerificationSummary,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Duplicate verification id
    #[error("Duplicate verification: {0}")]
    Duplicate(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidData(err.to_string())
    }
}

/// SQLite-based implementation of DocumentStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store behind a mutex or
/// give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

const DOCUMENT_COLUMNS: &str = "id, owner_id, original_text, simplified_text, file_name, file_size, \
     document_type, word_count, original_complexity, simplified_complexity, accuracy, \
     processing_time_ms, chunk_count, key_terms, created_at";

const VERIFICATION_COLUMNS: &str = "verification_id, file_name, authenticity_score, risk_level, \
     is_authentic, compliance_status, fraud_indicator_count, fallback, processing_time_ms, \
     analysis_json, created_at";

/// Raw column values of a `documents` row
struct DocumentRow {
    id: Vec<u8>,
    owner_id: String,
    original_text: String,
    simplified_text: String,
    file_name: Option<String>,
    file_size: Option<i64>,
    document_type: String,
    word_count: i64,
    original_complexity: f64,
    simplified_complexity: f64,
    accuracy: f64,
    processing_time_ms: i64,
    chunk_count: i64,
    key_terms: String,
    created_at: i64,
}

impl DocumentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            original_text: row.get(2)?,
            simplified_text: row.get(3)?,
            file_name: row.get(4)?,
            file_size: row.get(5)?,
            document_type: row.get(6)?,
            word_count: row.get(7)?,
            original_complexity: row.get(8)?,
            simplified_complexity: row.get(9)?,
            accuracy: row.get(10)?,
            processing_time_ms: row.get(11)?,
            chunk_count: row.get(12)?,
            key_terms: row.get(13)?,
            created_at: row.get(14)?,
        })
    }

    fn into_document(self) -> Result<StoredDocument, StoreError> {
        let document_type = DocumentType::parse(&self.document_type).ok_or_else(|| {
            StoreError::InvalidData(format!("Unknown document type: {}", self.document_type))
        })?;
        let pairs: Vec<(String, String)> = serde_json::from_str(&self.key_terms)?;

        Ok(StoredDocument {
            id: SqliteStore::bytes_to_document_id(&self.id)?,
            owner_id: self.owner_id,
            original_text: self.original_text,
            details: DocumentDetails {
                file_name: self.file_name,
                file_size: self.file_size.map(|s| s as u64),
                document_type,
            },
            word_count: self.word_count as usize,
            record: ResultRecord {
                simplified_text: self.simplified_text,
                original_complexity: self.original_complexity,
                simplified_complexity: self.simplified_complexity,
                accuracy: self.accuracy,
                processing_time_ms: self.processing_time_ms as u64,
                key_terms_simplified: pairs
                    .into_iter()
                    .map(|(original, simplified)| KeyTerm::new(original, simplified))
                    .collect(),
                chunk_count: self.chunk_count as usize,
            },
            created_at: self.created_at as u64,
        })
    }
}

/// Raw column values of a `usage_events` row
struct UsageRow {
    owner_id: String,
    action: String,
    document_id: Option<Vec<u8>>,
    api_endpoint: Option<String>,
    processing_time_ms: Option<i64>,
    tokens_used: Option<i64>,
    metadata: String,
    created_at: i64,
}

impl UsageRow {
    fn into_event(self) -> Result<UsageEvent, StoreError> {
        let action = UsageAction::parse(&self.action).ok_or_else(|| {
            StoreError::InvalidData(format!("Unknown usage action: {}", self.action))
        })?;
        let metadata: BTreeMap<String, String> = serde_json::from_str(&self.metadata)?;
        let document_id = self
            .document_id
            .as_deref()
            .map(SqliteStore::bytes_to_document_id)
            .transpose()?;

        Ok(UsageEvent {
            owner_id: self.owner_id,
            action,
            document_id,
            api_endpoint: self.api_endpoint,
            processing_time_ms: self.processing_time_ms.map(|t| t as u64),
            tokens_used: self.tokens_used.map(|t| t as u64),
            metadata,
            created_at: self.created_at as u64,
        })
    }
}

/// Raw column values of a `verifications` row
struct VerificationRow {
    verification_id: String,
    file_name: Option<String>,
    authenticity_score: f64,
    risk_level: String,
    is_authentic: bool,
    compliance_status: String,
    fraud_indicator_count: i64,
    fallback: bool,
    processing_time_ms: i64,
    analysis_json: String,
    created_at: i64,
}

impl VerificationRow {
    fn into_summary(self) -> Result<VerificationSummary, StoreError> {
        let risk_level = RiskLevel::parse(&self.risk_level).ok_or_else(|| {
            StoreError::InvalidData(format!("Unknown risk level: {}", self.risk_level))
        })?;
        let compliance_status = ComplianceStatus::parse(&self.compliance_status).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "Unknown compliance status: {}",
                self.compliance_status
            ))
        })?;

        Ok(VerificationSummary {
            verification_id: self.verification_id,
            file_name: self.file_name,
            authenticity_score: self.authenticity_score,
            risk_level,
            is_authentic: self.is_authentic,
            compliance_status,
            fraud_indicator_count: self.fraud_indicator_count as usize,
            fallback: self.fallback,
            processing_time_ms: self.processing_time_ms as u64,
            analysis_json: self.analysis_json,
            created_at: self.created_at as u64,
        })
    }
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexplain_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("lexplain.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Convert DocumentId to bytes for storage
    fn document_id_to_bytes(id: DocumentId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to DocumentId
    fn bytes_to_document_id(bytes: &[u8]) -> Result<DocumentId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for DocumentId, got {}",
                bytes.len()
            ))
        })?;
        Ok(DocumentId::from_value(u128::from_be_bytes(arr)))
    }

    /// Number of stored documents across all owners
    pub fn document_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Look up a verification by its `AUTH-...` id
    pub fn get_verification(
        &self,
        verification_id: &str,
    ) -> Result<Option<VerificationSummary>, StoreError> {
        let sql = format!(
            "SELECT {} FROM verifications WHERE verification_id = ?1",
            VERIFICATION_COLUMNS
        );
        self.conn
            .query_row(&sql, params![verification_id], Self::verification_row)
            .optional()?
            .map(VerificationRow::into_summary)
            .transpose()
    }

    fn verification_row(row: &Row<'_>) -> rusqlite::Result<VerificationRow> {
        Ok(VerificationRow {
            verification_id: row.get(0)?,
            file_name: row.get(1)?,
            authenticity_score: row.get(2)?,
            risk_level: row.get(3)?,
            is_authentic: row.get(4)?,
            compliance_status: row.get(5)?,
            fraud_indicator_count: row.get(6)?,
            fallback: row.get(7)?,
            processing_time_ms: row.get(8)?,
            analysis_json: row.get(9)?,
            created_at: row.get(10)?,
        })
    }
}

impl DocumentStore for SqliteStore {
    type Error = StoreError;

    fn save_document(
        &mut self,
        owner_id: &str,
        original_text: &str,
        details: &DocumentDetails,
        record: &ResultRecord,
    ) -> Result<DocumentId, Self::Error> {
        let id = DocumentId::new();
        let key_terms: Vec<(&str, &str)> = record
            .key_terms_simplified
            .iter()
            .map(|term| (term.original.as_str(), term.simplified.as_str()))
            .collect();

        self.conn.execute(
            "INSERT INTO documents (id, owner_id, original_text, simplified_text, file_name, file_size,
             file_type, document_type, word_count, original_complexity, simplified_complexity, accuracy,
             processing_time_ms, chunk_count, key_terms, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                Self::document_id_to_bytes(id),
                owner_id,
                original_text,
                &record.simplified_text,
                &details.file_name,
                details.file_size.map(|s| s as i64),
                details.file_type(),
                details.document_type.as_str(),
                original_text.split_whitespace().count() as i64,
                record.original_complexity,
                record.simplified_complexity,
                record.accuracy,
                record.processing_time_ms as i64,
                record.chunk_count as i64,
                serde_json::to_string(&key_terms)?,
                lexplain_domain::unix_now() as i64,
            ],
        )?;

        Ok(id)
    }

    fn fetch_history(
        &self,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM documents WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2",
            DOCUMENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![owner_id, limit as i64], DocumentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(DocumentRow::into_document).collect()
    }

    fn get_document(&self, id: DocumentId) -> Result<Option<StoredDocument>, Self::Error> {
        let sql = format!("SELECT {} FROM documents WHERE id = ?1", DOCUMENT_COLUMNS);
        self.conn
            .query_row(
                &sql,
                params![Self::document_id_to_bytes(id)],
                DocumentRow::from_row,
            )
            .optional()?
            .map(DocumentRow::into_document)
            .transpose()
    }

    fn track_usage(&mut self, event: &UsageEvent) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO usage_events (owner_id, action, document_id, api_endpoint,
             processing_time_ms, tokens_used, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &event.owner_id,
                event.action.as_str(),
                event.document_id.map(Self::document_id_to_bytes),
                &event.api_endpoint,
                event.processing_time_ms.map(|t| t as i64),
                event.tokens_used.map(|t| t as i64),
                serde_json::to_string(&event.metadata)?,
                event.created_at as i64,
            ],
        )?;
        Ok(())
    }

    fn usage_since(&self, owner_id: &str, since: u64) -> Result<Vec<UsageEvent>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT owner_id, action, document_id, api_endpoint, processing_time_ms, tokens_used,
             metadata, created_at
             FROM usage_events WHERE owner_id = ?1 AND created_at >= ?2
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map(params![owner_id, since as i64], |row| {
                Ok(UsageRow {
                    owner_id: row.get(0)?,
                    action: row.get(1)?,
                    document_id: row.get(2)?,
                    api_endpoint: row.get(3)?,
                    processing_time_ms: row.get(4)?,
                    tokens_used: row.get(5)?,
                    metadata: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(UsageRow::into_event).collect()
    }

    fn save_verification(
        &mut self,
        owner_id: &str,
        summary: &VerificationSummary,
    ) -> Result<DocumentId, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM verifications WHERE verification_id = ?1",
                params![&summary.verification_id],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(summary.verification_id.clone()));
        }

        let id = DocumentId::new();
        self.conn.execute(
            "INSERT INTO verifications (id, owner_id, verification_id, file_name, authenticity_score,
             risk_level, is_authentic, compliance_status, fraud_indicator_count, fallback,
             processing_time_ms, analysis_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                Self::document_id_to_bytes(id),
                owner_id,
                &summary.verification_id,
                &summary.file_name,
                summary.authenticity_score,
                summary.risk_level.as_str(),
                summary.is_authentic,
                summary.compliance_status.as_str(),
                summary.fraud_indicator_count as i64,
                summary.fallback,
                summary.processing_time_ms as i64,
                &summary.analysis_json,
                summary.created_at as i64,
            ],
        )?;

        Ok(id)
    }

    fn verification_history(
        &self,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<VerificationSummary>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM verifications WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2",
            VERIFICATION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![owner_id, limit as i64], Self::verification_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(VerificationRow::into_summary).collect()
    }
}
