//! TOML Configuration File Support
//!
//! Centralized configuration loading for the pet dialog, with a TOML file at
//! `~/.config/moyu-pet/pet.toml`.
//!
//! # Configuration Priority
//!
//! Values are applied in this order (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! base_url = "https://moyu.example.com"
//! token = "..."
//! timeout_secs = 30
//!
//! [dialog]
//! name_max_len = 10
//! default_avatar_url = "https://cdn.example.com/pet/default.png"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialog::DialogConfig;
use crate::validation::DEFAULT_NAME_MAX_LEN;

/// Default pet service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8123";

/// Avatar every new pet starts with
pub const DEFAULT_AVATAR_URL: &str =
    "https://api.oss.cqbo.com/moyu/pet/超级玛丽马里奥 (73)_爱给网_aigei_com.png";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Server section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerToml {
    /// Pet service base URL
    pub base_url: Option<String>,

    /// Bearer token for the pet service
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Dialog section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogToml {
    /// Maximum pet name length in characters
    pub name_max_len: Option<usize>,

    /// Avatar reference sent when creating a pet
    pub default_avatar_url: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetToml {
    /// Server configuration section
    pub server: ServerToml,

    /// Dialog configuration section
    pub dialog: DialogToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for the pet dialog and its backend
#[derive(Clone, Debug)]
pub struct PetConfig {
    /// Pet service base URL
    pub base_url: String,

    /// Bearer token, if any
    pub token: Option<String>,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Maximum pet name length in characters
    pub name_max_len: usize,

    /// Avatar reference sent when creating a pet
    pub default_avatar_url: String,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            name_max_len: DEFAULT_NAME_MAX_LEN,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl PetConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// The part of the configuration the dialog core uses
    #[must_use]
    pub fn dialog(&self) -> DialogConfig {
        DialogConfig {
            name_max_len: self.name_max_len,
            default_avatar_url: self.default_avatar_url.clone(),
        }
    }

    /// Check that the resolved values are usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty base URL, a zero
    /// name bound or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.base_url must not be empty".to_string(),
            ));
        }
        if self.name_max_len == 0 {
            return Err(ConfigError::ValidationError(
                "dialog.name_max_len must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "server.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/moyu-pet/pet.toml` or
/// `~/.config/moyu-pet/pet.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("moyu-pet").join("pet.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resolved values are invalid. A missing config file is not an error.
pub fn load_config() -> Result<PetConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if the resolved values are invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<PetConfig, ConfigError> {
    let mut config = PetConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: PetToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut PetConfig, toml: &PetToml) {
    if let Some(ref url) = toml.server.base_url {
        config.base_url.clone_from(url);
    }
    if toml.server.token.is_some() {
        config.token.clone_from(&toml.server.token);
    }
    if let Some(secs) = toml.server.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    if let Some(max) = toml.dialog.name_max_len {
        config.name_max_len = max;
    }
    if let Some(ref url) = toml.dialog.default_avatar_url {
        config.default_avatar_url.clone_from(url);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut PetConfig) {
    if let Ok(url) = std::env::var("MOYU_PET_BASE_URL") {
        config.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Ok(token) = std::env::var("MOYU_PET_TOKEN") {
        config.token = Some(token);
        config.source = ConfigSource::Env;
    }
    if let Ok(timeout) = std::env::var("MOYU_PET_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.request_timeout = Duration::from_secs(secs);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(max) = std::env::var("MOYU_PET_NAME_MAX_LEN") {
        if let Ok(n) = max.parse::<usize>() {
            config.name_max_len = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(url) = std::env::var("MOYU_PET_AVATAR_URL") {
        config.default_avatar_url = url;
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Values supplied on the command line, applied after everything else
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Pet service base URL
    pub base_url: Option<String>,
    /// Bearer token
    pub token: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the token
    #[must_use]
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Apply the overrides
    pub fn apply(&self, config: &mut PetConfig) {
        if let Some(ref url) = self.base_url {
            config.base_url.clone_from(url);
            config.source = ConfigSource::Cli;
        }
        if let Some(ref token) = self.token {
            config.token = Some(token.clone());
            config.source = ConfigSource::Cli;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = PetConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.name_max_len, 10);
        assert_eq!(config.default_avatar_url, DEFAULT_AVATAR_URL);
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.to_string_lossy().contains("moyu-pet"));
            assert!(p.to_string_lossy().ends_with("pet.toml"));
        }
    }

    #[test]
    fn test_parse_valid_toml() {
        let file = write_config(
            r#"
[server]
base_url = "https://pets.example.test"
token = "secret"
timeout_secs = 5

[dialog]
name_max_len = 12
default_avatar_url = "https://cdn.example.test/fish.png"
"#,
        );

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.base_url, "https://pets.example.test");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.name_max_len, 12);
        assert_eq!(config.default_avatar_url, "https://cdn.example.test/fish.png");
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_parse_partial_toml() {
        let file = write_config("[dialog]\nname_max_len = 8\n");

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.name_max_len, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_avatar_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[server\nbase_url = ");

        let result = load_config_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_name_bound_rejected() {
        let file = write_config("[dialog]\nname_max_len = 0\n");

        let result = load_config_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/moyu-pet/pet.toml");
        let config = load_config_from_path(Some(path)).unwrap();
        assert!(config.config_file_path.is_none());
        assert!(config.name_max_len > 0);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = PetConfig::default();
        ConfigOverrides::new()
            .with_base_url("http://override.test".to_string())
            .with_token("cli-token".to_string())
            .apply(&mut config);

        assert_eq!(config.base_url, "http://override.test");
        assert_eq!(config.token.as_deref(), Some("cli-token"));
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_dialog_config_projection() {
        let mut config = PetConfig::default();
        config.name_max_len = 6;
        let dialog = config.dialog();
        assert_eq!(dialog.name_max_len, 6);
        assert_eq!(dialog.default_avatar_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::File.to_string(), "config file");
    }
}
