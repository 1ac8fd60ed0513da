//! Configuration management.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use wakabar_core::ApiKey;

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/wakabar`
/// - Linux: `~/.config/wakabar`
/// - Windows: `%APPDATA%\wakabar`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("wakabar"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Application configuration, as stored in `config.json`.
///
/// Every field is optional; command-line flags and environment variables
/// take precedence over these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key.
    pub api_key: Option<String>,
    /// API base URL.
    pub api_url: Option<String>,
    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout: Option<u64>,
    /// Proxy URL.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub no_ssl_verify: bool,
    /// Machine name reported to the API.
    pub hostname: Option<String>,
    /// Show only the grand total in the status bar.
    pub status_bar_hide_categories: bool,
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_dir().join("config.json")
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Returns a copy safe to display, with the API key masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let api_key = self.api_key.as_deref().map(|raw| {
            ApiKey::parse(raw).map_or_else(|_| "<invalid>".to_string(), |k| k.masked())
        });
        Self {
            api_key,
            ..self.clone()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with("wakabar/config.json"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_key": "abc", "status_bar_hide_categories": true, "unknown": 1}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert!(config.status_bar_hide_categories);
        assert!(config.api_url.is_none());
        assert!(!config.no_ssl_verify);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_redacted_masks_key() {
        let config = Config {
            api_key: Some("00000000-0000-4000-8000-00000000beef".to_string()),
            ..Config::default()
        };
        let redacted = config.redacted();
        let key = redacted.api_key.unwrap();
        assert!(key.ends_with("beef"));
        assert!(!key.contains("00000000-0000"));

        let config = Config {
            api_key: Some("garbage".to_string()),
            ..Config::default()
        };
        assert_eq!(config.redacted().api_key.as_deref(), Some("<invalid>"));
    }
}
