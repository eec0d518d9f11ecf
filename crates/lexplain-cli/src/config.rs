//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lexplain_simplifier::SimplifierConfig;
use lexplain_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Simplification tuning
    #[serde(default)]
    pub simplifier: SimplifierConfig,

    /// Verification tuning
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Service and storage profile.
///
/// Unset fields fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// SQLite database file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// User id that owns stored results; anonymous when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Per-run overrides taken from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Model name
    pub model: Option<String>,
    /// SQLite database file
    pub database: Option<PathBuf>,
    /// User id
    pub user_id: Option<String>,
}

impl Config {
    /// Directory holding the config file and the default database.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lexplain"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the tuning sections.
    pub fn validate(&self) -> Result<()> {
        self.simplifier
            .validate()
            .map_err(|e| CliError::Config(format!("[simplifier] {}", e)))?;
        self.verifier
            .validate()
            .map_err(|e| CliError::Config(format!("[verifier] {}", e)))?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Get the active profile for editing, creating it if needed.
    pub fn active_profile_mut(&mut self) -> &mut Profile {
        self.profiles
            .entry(self.active_profile.clone())
            .or_default()
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Apply per-run overrides to the active profile.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        let profile = self.active_profile_mut();
        if let Some(model) = overrides.model {
            profile.model = Some(model);
        }
        if let Some(database) = overrides.database {
            profile.database = Some(database);
        }
        if let Some(user_id) = overrides.user_id {
            profile.user_id = Some(user_id);
        }
    }
}

impl Profile {
    /// Database path, defaulting to `~/.lexplain/lexplain.db`.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::dir()?.join("lexplain.db")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(default_profile(), Profile::default());

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            simplifier: SimplifierConfig::default(),
            verifier: VerifierConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap(), &Profile::default());
        assert!(config.settings.color);
        assert_eq!(config.simplifier, SimplifierConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.active_profile_mut().model = Some("gemini-1.5-pro".to_string());
        config.active_profile_mut().user_id = Some("alice".to_string());
        config.simplifier.max_chunk_size = 2000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let profile = loaded.get_active_profile().unwrap();
        assert_eq!(profile.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(profile.user_id.as_deref(), Some("alice"));
        assert_eq!(profile.database, None);
        assert_eq!(loaded.simplifier.max_chunk_size, 2000);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_partial_file_is_filled_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[settings]\nformat = \"json\"\n\n[simplifier]\ninter_chunk_delay_ms = 0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.simplifier.inter_chunk_delay_ms, 0);
        assert_eq!(
            config.simplifier.max_chunk_size,
            SimplifierConfig::default().max_chunk_size
        );
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[simplifier]\nmax_chunk_size = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.starts_with("[simplifier]")));
    }

    #[test]
    fn test_overrides_apply_to_active_profile() {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            user_id: Some("bob".to_string()),
            ..Overrides::default()
        });

        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.user_id.as_deref(), Some("bob"));
        assert_eq!(profile.model, None);
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_database_path() {
        let profile = Profile {
            database: Some(PathBuf::from("/tmp/lexplain-test.db")),
            ..Profile::default()
        };
        assert_eq!(
            profile.database_path().unwrap(),
            PathBuf::from("/tmp/lexplain-test.db")
        );
    }
}
