//! Lexplain Simplifier
//!
//! Rewrites legal documents in plain English using a generative-language model.
//!
//! # Overview
//!
//! Long documents are split into sentence-aligned chunks that fit the model's
//! input budget. Chunks are transformed strictly one at a time, with a short
//! throttle between calls and a single retry when the service reports a rate
//! limit. The outputs are combined in order and scored for complexity.
//!
//! # Architecture
//!
//! ```text
//! Text → Gatekeeper → TextChunker → Orchestrator → LLM (per chunk)
//!                                        ↓
//!                  ResultAssembler → ResultRecord → DocumentStore (best effort)
//! ```
//!
//! # Key Features
//!
//! - **Sentence-aligned chunking**: chunks never split a sentence
//! - **Bounded retry**: a [`RetryPolicy`] value object with an injectable [`Sleeper`]
//! - **Progress reporting**: percentages and status lines through a [`ProgressSink`]
//! - **Best-effort persistence**: storage failures never fail a simplification
//!
//! # Example Usage
//!
//! ```no_run
//! use lexplain_simplifier::{SimplificationRequest, Simplifier, SimplifierConfig};
//! use lexplain_llm::MockProvider;
//! use lexplain_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("You must pay rent on the first of each month.");
//! let store = SqliteStore::new(":memory:")?;
//! let simplifier = Simplifier::new(llm, store, SimplifierConfig::default())?;
//!
//! let request = SimplificationRequest::new(
//!     "The lessee hereby covenants to pay rent on the first day of each calendar month.",
//! );
//! let response = simplifier.simplify(request).await?;
//!
//! println!("{}", response.record.simplified_text);
//! println!(
//!     "Complexity: {:.0} -> {:.0}",
//!     response.record.original_complexity, response.record.simplified_complexity
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod best_effort;
mod chunking;
mod config;
mod error;
mod orchestrator;
mod progress;
mod prompt;
mod retry;
mod simplifier;
mod types;


pub use assembler::{
    accuracy_estimate, combine_chunks, strip_marker, ResultAssembler, CHUNK_SEPARATOR,
};
pub use best_effort::{best_effort, FailureSink, RecordingSink, TracingSink};
pub use chunking::{split_sentences, TextChunker};
pub use config::SimplifierConfig;
pub use error::{FailureKind, SimplifierError};
pub use orchestrator::Orchestrator;
pub use progress::{chunk_percent, NoProgress, ProgressLog, ProgressSink, ProgressUpdate};
pub use prompt::PromptBuilder;
pub use retry::{rate_limited_only, RecordingSleeper, RetryPolicy, Sleeper, TokioSleeper};
pub use simplifier::{approximate_tokens, Simplifier};
pub use types::{ComplexityHint, SimplificationRequest, SimplificationResponse};
