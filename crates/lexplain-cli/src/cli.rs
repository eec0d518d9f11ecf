//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use lexplain_domain::DocumentType;
use lexplain_simplifier::ComplexityHint;
use std::path::PathBuf;

/// Lexplain CLI - Plain-language explanations and authenticity checks for legal documents.
#[derive(Debug, Parser)]
#[command(name = "lexplain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LEXPLAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Model override for this run
    #[arg(long, global = true, env = "LEXPLAIN_MODEL")]
    pub model: Option<String>,

    /// Database override for this run
    #[arg(long, global = true, env = "LEXPLAIN_DATABASE")]
    pub database: Option<PathBuf>,

    /// User id override for this run
    #[arg(long, global = true, env = "LEXPLAIN_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (text or IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite a legal document in plain language
    Simplify(SimplifyArgs),

    /// Analyze a document for authenticity and compliance
    Verify(VerifyArgs),

    /// List previous simplifications or verifications
    History(HistoryArgs),

    /// Show one stored simplification or verification
    Show(ShowArgs),

    /// Summarize usage over recent days
    Usage(UsageArgs),

    /// Inspect or change the configuration
    Config(ConfigArgs),
}

/// Arguments for the simplify command.
#[derive(Debug, Parser)]
pub struct SimplifyArgs {
    /// Document to simplify
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Kind of document
    #[arg(short = 't', long, value_enum, default_value = "legal-document")]
    pub document_type: DocumentTypeArg,

    /// How dense the input is
    #[arg(long, value_enum)]
    pub complexity: Option<ComplexityArg>,

    /// Maximum characters per chunk sent to the model
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Do not store the result or record usage
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Document to analyze
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Kind of document
    #[arg(short = 't', long, value_enum, default_value = "legal-document")]
    pub document_type: DocumentTypeArg,

    /// Print the plain-text certificate instead of the report
    #[arg(long)]
    pub certificate: bool,

    /// Do not store the analysis or record usage
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of entries
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// List authenticity verifications instead of simplifications
    #[arg(long)]
    pub verifications: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Document id, or a verification id starting with AUTH-
    pub id: String,
}

/// Arguments for the usage command.
#[derive(Debug, Parser)]
pub struct UsageArgs {
    /// Number of days to include
    #[arg(short, long, default_value = "30")]
    pub days: u64,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the active profile and settings
    Show,

    /// Set the model used by the active profile
    SetModel {
        /// Model name
        model: String,
    },

    /// Set the user id that owns stored results
    SetUser {
        /// User id
        user_id: String,
    },

    /// Set the database file of the active profile
    SetDatabase {
        /// Path to the SQLite database
        path: PathBuf,
    },
}

/// Document type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DocumentTypeArg {
    /// A contract between parties
    Contract,
    /// A general agreement
    Agreement,
    /// Any other legal document
    LegalDocument,
    /// Terms and conditions of a service
    TermsAndConditions,
    /// Unclassified text
    Other,
}

/// Complexity hint argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ComplexityArg {
    /// Dense legal prose
    High,
    /// Ordinary contract language
    Medium,
    /// Mostly plain text already
    Low,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<DocumentTypeArg> for DocumentType {
    fn from(arg: DocumentTypeArg) -> Self {
        match arg {
            DocumentTypeArg::Contract => DocumentType::Contract,
            DocumentTypeArg::Agreement => DocumentType::Agreement,
            DocumentTypeArg::LegalDocument => DocumentType::LegalDocument,
            DocumentTypeArg::TermsAndConditions => DocumentType::TermsAndConditions,
            DocumentTypeArg::Other => DocumentType::Other,
        }
    }
}

impl From<ComplexityArg> for ComplexityHint {
    fn from(arg: ComplexityArg) -> Self {
        match arg {
            ComplexityArg::High => ComplexityHint::High,
            ComplexityArg::Medium => ComplexityHint::Medium,
            ComplexityArg::Low => ComplexityHint::Low,
        }
    }
}
