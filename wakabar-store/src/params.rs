//! Parameter loading.
//!
//! Values are resolved in order: command-line overrides (which clap also
//! fills from the environment), then the config file, then defaults.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use wakabar_core::{
    ApiKey, ApiParams, CoreError, NetworkParams, StatusBarParams, DEFAULT_TIMEOUT_SECS,
};

use crate::config::Config;
use crate::error::StoreError;

// ============================================================================
// Errors
// ============================================================================

/// Errors from loading API parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// A value was missing or malformed.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Config(#[from] StoreError),
}

// ============================================================================
// Overrides
// ============================================================================

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ParamOverrides {
    /// API key.
    pub api_key: Option<String>,
    /// API base URL.
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
    /// Proxy URL.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub no_ssl_verify: bool,
    /// Machine name.
    pub hostname: Option<String>,
    /// Editor plugin identifier.
    pub plugin: Option<String>,
    /// Show only the grand total.
    pub hide_categories: bool,
}

// ============================================================================
// Loader
// ============================================================================

/// Supplies the parameter bundles for one invocation.
pub trait ParamsLoader {
    /// Loads API parameters.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` if the key or URL is missing or invalid, or the
    /// config file cannot be read.
    fn load_api_params(&self) -> Result<ApiParams, ParamsError>;

    /// Loads status bar parameters. Never fails; falls back to defaults.
    fn load_status_bar_params(&self) -> StatusBarParams;
}

/// [`ParamsLoader`] backed by a JSON config file and overrides.
#[derive(Debug, Clone)]
pub struct ConfigParamsLoader {
    path: PathBuf,
    overrides: ParamOverrides,
}

impl ConfigParamsLoader {
    /// Creates a loader reading the config file at `path`.
    pub fn new(path: impl Into<PathBuf>, overrides: ParamOverrides) -> Self {
        Self {
            path: path.into(),
            overrides,
        }
    }
}

impl ParamsLoader for ConfigParamsLoader {
    fn load_api_params(&self) -> Result<ApiParams, ParamsError> {
        let config = Config::load_from(&self.path)?;
        Ok(resolve_api_params(&config, &self.overrides)?)
    }

    fn load_status_bar_params(&self) -> StatusBarParams {
        let config = Config::load_from(&self.path).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring unreadable config for status bar");
            Config::default()
        });
        resolve_status_bar_params(&config, &self.overrides)
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves API parameters from a config and overrides.
///
/// # Errors
///
/// Returns `CoreError::MissingApiKey`, `CoreError::InvalidApiKey` or
/// `CoreError::InvalidApiUrl`.
pub fn resolve_api_params(
    config: &Config,
    overrides: &ParamOverrides,
) -> Result<ApiParams, CoreError> {
    let raw_key = first_non_empty(overrides.api_key.as_deref(), config.api_key.as_deref())
        .ok_or(CoreError::MissingApiKey)?;
    let mut params = ApiParams::new(ApiKey::parse(raw_key)?);

    if let Some(url) = first_non_empty(overrides.api_url.as_deref(), config.api_url.as_deref()) {
        params.base_url = ApiParams::parse_base_url(url)?;
    }

    let timeout_secs = overrides
        .timeout
        .or(config.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    params.network = NetworkParams {
        timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        proxy: first_non_empty(overrides.proxy.as_deref(), config.proxy.as_deref())
            .map(str::to_string),
        disable_ssl_verify: overrides.no_ssl_verify || config.no_ssl_verify,
        hostname: first_non_empty(overrides.hostname.as_deref(), config.hostname.as_deref())
            .map(str::to_string),
        plugin: first_non_empty(overrides.plugin.as_deref(), None).map(str::to_string),
    };

    debug!(
        base_url = %params.base_url,
        key = %params.key,
        timeout_secs,
        "Resolved API parameters"
    );
    Ok(params)
}

/// Resolves status bar parameters from a config and overrides.
pub fn resolve_status_bar_params(config: &Config, overrides: &ParamOverrides) -> StatusBarParams {
    StatusBarParams {
        hide_categories: overrides.hide_categories || config.status_bar_hide_categories,
    }
}

fn first_non_empty<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    primary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.map(str::trim).filter(|s| !s.is_empty()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const KEY: &str = "00000000-0000-4000-8000-000000000000";
    const OTHER_KEY: &str = "11111111-1111-4111-9111-111111111111";

    fn config_with_key(key: &str) -> Config {
        Config {
            api_key: Some(key.to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_missing_key() {
        let result = resolve_api_params(&Config::default(), &ParamOverrides::default());
        assert!(matches!(result, Err(CoreError::MissingApiKey)));
    }

    #[test]
    fn test_blank_override_falls_back_to_config() {
        let overrides = ParamOverrides {
            api_key: Some("   ".to_string()),
            ..ParamOverrides::default()
        };
        let params = resolve_api_params(&config_with_key(KEY), &overrides).unwrap();
        assert_eq!(params.key.expose(), KEY);
    }

    #[test]
    fn test_override_wins_over_config() {
        let overrides = ParamOverrides {
            api_key: Some(OTHER_KEY.to_string()),
            api_url: Some("http://localhost:3000/api".to_string()),
            timeout: Some(5),
            ..ParamOverrides::default()
        };
        let config = Config {
            api_url: Some("https://example.com/api".to_string()),
            timeout: Some(60),
            ..config_with_key(KEY)
        };

        let params = resolve_api_params(&config, &overrides).unwrap();
        assert_eq!(params.key.expose(), OTHER_KEY);
        assert_eq!(params.base_url.as_str(), "http://localhost:3000/api");
        assert_eq!(params.network.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_defaults() {
        let params = resolve_api_params(&config_with_key(KEY), &ParamOverrides::default()).unwrap();
        assert_eq!(params.base_url.as_str(), "https://api.wakatime.com/api/v1");
        assert_eq!(
            params.network.timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
        assert!(params.network.proxy.is_none());
        assert!(!params.network.disable_ssl_verify);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = Config {
            timeout: Some(0),
            ..config_with_key(KEY)
        };
        let params = resolve_api_params(&config, &ParamOverrides::default()).unwrap();
        assert!(params.network.timeout.is_none());
    }

    #[test]
    fn test_invalid_url() {
        let config = Config {
            api_url: Some("not a url".to_string()),
            ..config_with_key(KEY)
        };
        let result = resolve_api_params(&config, &ParamOverrides::default());
        assert!(matches!(result, Err(CoreError::InvalidApiUrl { .. })));
    }

    #[test]
    fn test_network_values_from_config() {
        let config = Config {
            proxy: Some("http://proxy:8080".to_string()),
            no_ssl_verify: true,
            hostname: Some("laptop".to_string()),
            ..config_with_key(KEY)
        };
        let overrides = ParamOverrides {
            plugin: Some("vim/9.0".to_string()),
            ..ParamOverrides::default()
        };
        let params = resolve_api_params(&config, &overrides).unwrap();
        assert_eq!(params.network.proxy.as_deref(), Some("http://proxy:8080"));
        assert!(params.network.disable_ssl_verify);
        assert_eq!(params.network.hostname.as_deref(), Some("laptop"));
        assert_eq!(params.network.plugin.as_deref(), Some("vim/9.0"));
    }

    #[test]
    fn test_hide_categories_from_either_source() {
        let config = Config {
            status_bar_hide_categories: true,
            ..Config::default()
        };
        assert!(resolve_status_bar_params(&config, &ParamOverrides::default()).hide_categories);

        let overrides = ParamOverrides {
            hide_categories: true,
            ..ParamOverrides::default()
        };
        assert!(resolve_status_bar_params(&Config::default(), &overrides).hide_categories);
        assert!(
            !resolve_status_bar_params(&Config::default(), &ParamOverrides::default())
                .hide_categories
        );
    }

    #[test]
    fn test_loader_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            format!(r#"{{"api_key": "{KEY}", "status_bar_hide_categories": true}}"#),
        )
        .unwrap();

        let loader = ConfigParamsLoader::new(&path, ParamOverrides::default());
        assert_eq!(loader.load_api_params().unwrap().key.expose(), KEY);
        assert!(loader.load_status_bar_params().hide_categories);
    }

    #[test]
    fn test_loader_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "[").unwrap();

        let loader = ConfigParamsLoader::new(&path, ParamOverrides::default());
        assert!(matches!(
            loader.load_api_params(),
            Err(ParamsError::Config(StoreError::Serialization(_)))
        ));
        // Status bar params never fail
        assert_eq!(loader.load_status_bar_params(), StatusBarParams::default());
    }
}
