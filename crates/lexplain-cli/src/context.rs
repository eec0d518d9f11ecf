//! Services resolved from the active profile.

use crate::config::{Config, Profile};
use crate::error::Result;
use lexplain_domain::traits::{Anonymous, IdentityProvider, StaticIdentity};
use lexplain_domain::UserIdentity;
use lexplain_llm::{GeminiConfig, GeminiProvider};
use lexplain_simplifier::SimplifierConfig;
use lexplain_store::SqliteStore;
use lexplain_verifier::VerifierConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs from the configuration.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// The active profile, overrides applied
    pub profile: Profile,

    /// Resolved database path
    pub database: PathBuf,

    /// Simplification tuning
    pub simplifier: SimplifierConfig,

    /// Verification tuning
    pub verifier: VerifierConfig,
}

impl AppContext {
    /// Resolve the active profile of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let profile = config.get_active_profile()?.clone();
        let database = profile.database_path()?;
        Ok(Self {
            profile,
            database,
            simplifier: config.simplifier.clone(),
            verifier: config.verifier.clone(),
        })
    }

    /// Open the document store, creating its directory if needed.
    pub fn open_store(&self) -> Result<SqliteStore> {
        if let Some(parent) = self.database.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("Opening database {}", self.database.display());
        Ok(SqliteStore::new(&self.database)?)
    }

    /// The configured user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.profile.user_id.as_deref()
    }

    /// Identity that owns stored results.
    ///
    /// Anonymous when no user is configured or saving is disabled.
    pub fn identity(&self, save: bool) -> Arc<dyn IdentityProvider> {
        match (save, self.user_id()) {
            (true, Some(id)) => Arc::new(StaticIdentity(UserIdentity::new(id))),
            _ => Arc::new(Anonymous),
        }
    }

    /// Provider settings with the API key read from the environment.
    pub fn llm_config(&self) -> Result<GeminiConfig> {
        Ok(self.apply_profile(GeminiConfig::from_env()?))
    }

    /// Apply the profile's model and endpoint to `config`.
    pub fn apply_profile(&self, mut config: GeminiConfig) -> GeminiConfig {
        if let Some(model) = &self.profile.model {
            config = config.with_model(model);
        }
        if let Some(endpoint) = &self.profile.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config
    }

    /// Build the generative-language provider.
    pub fn llm(&self) -> Result<GeminiProvider> {
        Ok(GeminiProvider::new(self.llm_config()?)?)
    }
}
