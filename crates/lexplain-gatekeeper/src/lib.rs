//! Lexplain Gatekeeper
//!
//! Validates submitted text before any processing happens.
//!
//! The Gatekeeper checks:
//! - Emptiness
//! - Minimum and maximum length (in characters)
//! - Embedded markup, when the pipeline only accepts plain text
//!
//! All failed checks are reported together so the caller can show every
//! problem at once.
//!
//! # Examples
//!
//! ```
//! use lexplain_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::simplification());
//! let result = gatekeeper.validate("too short");
//! assert!(!result.is_valid());
//! assert!(result.messages()[0].contains("too short"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
