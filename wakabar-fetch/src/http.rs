//! HTTP client built from [`NetworkParams`].
//!
//! Wraps `reqwest` with:
//! - Timeout, proxy and TLS settings from the config layer
//! - The wakabar user agent
//! - Request/response tracing

use reqwest::{header, header::HeaderMap, Client, Response};
use tracing::{debug, instrument};
use wakabar_core::NetworkParams;

use crate::error::ApiError;

/// User agent prefix for wakabar.
const USER_AGENT: &str = concat!("wakabar/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper configured from [`NetworkParams`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Builds a client from network settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the proxy URL is invalid or the TLS
    /// backend cannot be initialised.
    pub fn from_network(network: &NetworkParams) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(user_agent(network.plugin.as_deref()));

        if let Some(timeout) = network.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy) = network.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ApiError::Config(format!("invalid proxy {proxy:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        if network.disable_ssl_verify {
            debug!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { inner })
    }

    /// Performs a GET request with custom headers.
    #[instrument(skip(self, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        debug!("GET request with headers");

        let response = self.inner.get(url).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

/// Builds the user agent string: `wakabar/<version> (<os>-<arch>) [plugin]`.
fn user_agent(plugin: Option<&str>) -> String {
    let base = format!(
        "{USER_AGENT} ({}-{})",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    match plugin.map(str::trim).filter(|p| !p.is_empty()) {
        Some(plugin) => format!("{base} {plugin}"),
        None => base,
    }
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_without_plugin() {
        let ua = user_agent(None);
        assert!(ua.starts_with("wakabar/"));
        assert!(ua.contains(std::env::consts::OS));
    }

    #[test]
    fn test_user_agent_with_plugin() {
        let ua = user_agent(Some("vscode/1.90 vscode-wakatime/24.0"));
        assert!(ua.ends_with(" vscode/1.90 vscode-wakatime/24.0"));

        // Blank plugin is ignored
        assert_eq!(user_agent(Some("  ")), user_agent(None));
    }

    #[test]
    fn test_from_network_defaults() {
        assert!(HttpClient::from_network(&NetworkParams::default()).is_ok());
    }

    #[test]
    fn test_from_network_with_proxy_and_no_verify() {
        let network = NetworkParams {
            proxy: Some("http://127.0.0.1:3128".to_string()),
            disable_ssl_verify: true,
            timeout: None,
            ..NetworkParams::default()
        };
        assert!(HttpClient::from_network(&network).is_ok());
    }
}
