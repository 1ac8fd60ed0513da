//! Parameter bundles handed from the config layer to the API client and
//! renderer.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::error::CoreError;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.wakatime.com/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

static API_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(waka_)?[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
    .unwrap_or_else(|e| panic!("API key pattern is invalid: {e}"))
});

// ============================================================================
// API Key
// ============================================================================

/// A validated API key.
///
/// Keys are UUIDv4 strings, optionally prefixed with `waka_`. The `Debug`
/// and `Display` impls mask everything except the last four characters.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates and wraps a raw key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingApiKey` for an empty value and
    /// `CoreError::InvalidApiKey` if the value is not a valid key.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::MissingApiKey);
        }
        if !API_KEY_PATTERN.is_match(raw) {
            return Err(CoreError::InvalidApiKey);
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the key with all but the last four characters masked.
    pub fn masked(&self) -> String {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("********-****-****-****-********{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

// ============================================================================
// Network Params
// ============================================================================

/// Network settings for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    /// Request timeout. `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Proxy URL applied to all requests.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub disable_ssl_verify: bool,
    /// Machine name sent in the `X-Machine-Name` header.
    pub hostname: Option<String>,
    /// Editor plugin identifier appended to the user agent.
    pub plugin: Option<String>,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            proxy: None,
            disable_ssl_verify: false,
            hostname: None,
            plugin: None,
        }
    }
}

// ============================================================================
// API Params
// ============================================================================

/// Everything the API client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiParams {
    /// API base URL, without a trailing slash.
    pub base_url: Url,
    /// The API key.
    pub key: ApiKey,
    /// Network settings.
    pub network: NetworkParams,
}

impl ApiParams {
    /// Creates params for the default API URL.
    ///
    /// # Panics
    ///
    /// Never in practice: [`DEFAULT_API_URL`] is a valid URL.
    pub fn new(key: ApiKey) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL)
                .unwrap_or_else(|e| panic!("default api url is invalid: {e}")),
            key,
            network: NetworkParams::default(),
        }
    }

    /// Parses an API base URL.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidApiUrl` if the value is not an absolute
    /// `http` or `https` URL.
    pub fn parse_base_url(raw: &str) -> Result<Url, CoreError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| CoreError::InvalidApiUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CoreError::InvalidApiUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme {other:?}"),
            }),
        }
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ============================================================================
// Status Bar Params
// ============================================================================

/// Display options for the rendered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBarParams {
    /// Show only the grand total, without the category breakdown.
    pub hide_categories: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "00000000-0000-4000-8000-000000000000";

    #[test]
    fn test_api_key_accepts_uuid_v4() {
        assert!(ApiKey::parse(KEY).is_ok());
        assert!(ApiKey::parse(&format!("waka_{KEY}")).is_ok());
        assert!(ApiKey::parse("AAAAAAAA-BBBB-4CCC-9DDD-EEEEEEEEEEEE").is_ok());
    }

    #[test]
    fn test_api_key_rejects_empty() {
        assert!(matches!(ApiKey::parse(""), Err(CoreError::MissingApiKey)));
        assert!(matches!(ApiKey::parse("  "), Err(CoreError::MissingApiKey)));
    }

    #[test]
    fn test_api_key_rejects_malformed() {
        for raw in [
            "not-a-key",
            "00000000-0000-1000-8000-000000000000", // not v4
            "00000000-0000-4000-0000-000000000000", // bad variant
            "sk_00000000-0000-4000-8000-000000000000",
        ] {
            assert!(
                matches!(ApiKey::parse(raw), Err(CoreError::InvalidApiKey)),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::parse("00000000-0000-4000-8000-00000000abcd").unwrap();
        let debug = format!("{key:?}");
        assert!(debug.ends_with("abcd\")"));
        assert!(!debug.contains("00000000-0000-4000"));
        assert_eq!(key.expose(), "00000000-0000-4000-8000-00000000abcd");
    }

    #[test]
    fn test_parse_base_url() {
        let url = ApiParams::parse_base_url("https://example.com/api/v1/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1");

        assert!(ApiParams::parse_base_url("ftp://example.com").is_err());
        assert!(ApiParams::parse_base_url("example.com").is_err());
    }

    #[test]
    fn test_endpoint_join() {
        let mut params = ApiParams::new(ApiKey::parse(KEY).unwrap());
        assert_eq!(
            params.endpoint("/users/current/statusbar/today"),
            "https://api.wakatime.com/api/v1/users/current/statusbar/today"
        );

        params.base_url = ApiParams::parse_base_url("http://localhost:8080/").unwrap();
        assert_eq!(
            params.endpoint("users/current/statusbar/today"),
            "http://localhost:8080/users/current/statusbar/today"
        );
    }

    #[test]
    fn test_network_defaults() {
        let network = NetworkParams::default();
        assert_eq!(network.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
        assert!(!network.disable_ssl_verify);
        assert!(network.proxy.is_none());
    }

    #[test]
    fn test_status_bar_defaults() {
        assert!(!StatusBarParams::default().hide_categories);
    }
}
