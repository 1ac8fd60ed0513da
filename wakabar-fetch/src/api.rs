//! WakaTime status bar API client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use wakabar_core::{ApiParams, CategoryTotal, SummaryRange, TodaySummary};

use crate::error::ApiError;
use crate::http::{HttpClient, ResponseExt};
use crate::provider::TodayProvider;

// ============================================================================
// Constants
// ============================================================================

/// Today's status bar endpoint, relative to the API base URL.
pub const TODAY_ENDPOINT: &str = "users/current/statusbar/today";

/// Header carrying the machine name.
const MACHINE_NAME_HEADER: &str = "x-machine-name";

// ============================================================================
// API Response Types
// ============================================================================

/// Response from the status bar endpoint.
#[derive(Debug, Deserialize)]
struct StatusBarResponse {
    data: StatusBarData,
}

#[derive(Debug, Deserialize)]
struct StatusBarData {
    grand_total: GrandTotal,
    #[serde(default)]
    categories: Vec<CategoryEntry>,
    #[serde(default)]
    range: Option<RangeEntry>,
}

#[derive(Debug, Deserialize)]
struct GrandTotal {
    #[serde(default)]
    text: String,
    #[serde(default)]
    total_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    total_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct RangeEntry {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl StatusBarData {
    fn into_summary(self) -> TodaySummary {
        let categories = self
            .categories
            .into_iter()
            .map(|c| CategoryTotal::new(c.name, c.text).with_seconds(c.total_seconds))
            .collect();

        let range = self.range.map(|r| SummaryRange {
            date: r
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            timezone: r.timezone,
            text: r.text,
        });

        TodaySummary {
            total: self.grand_total.text,
            total_seconds: self.grand_total.total_seconds,
            categories,
            range,
        }
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Client for the status bar API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    today_url: String,
    headers: HeaderMap,
}

impl ApiClient {
    /// Creates a client from API parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the network settings are unusable or a
    /// header value cannot be encoded.
    pub fn new(params: &ApiParams) -> Result<Self, ApiError> {
        let http = HttpClient::from_network(&params.network)?;
        let headers = build_headers(params)?;

        Ok(Self {
            http,
            today_url: params.endpoint(TODAY_ENDPOINT),
            headers,
        })
    }

    /// Returns the URL used for today's summary.
    pub fn today_url(&self) -> &str {
        &self.today_url
    }

    /// Fetches today's summary.
    ///
    /// # Errors
    ///
    /// Returns one of the classified [`ApiError`] variants depending on the
    /// response status, or `ApiError::Transport` if no response arrived.
    #[instrument(skip(self), fields(url = %self.today_url))]
    pub async fn today(&self) -> Result<TodaySummary, ApiError> {
        debug!("Fetching today's summary");

        let url = self.today_url.as_str();
        let response = self.http.get_with_headers(url, self.headers.clone()).await?;

        let status = response.status();
        let retry_after = response.retry_after_secs();
        if response.is_rate_limited() {
            warn!(?retry_after, "Rate limited");
            return Err(ApiError::Backoff {
                url: url.to_string(),
                retry_after,
            });
        }

        let body = response.text().await?;

        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::auth(url, &body));
            }
            StatusCode::BAD_REQUEST => return Err(ApiError::bad_request(url, &body)),
            other => return Err(ApiError::unexpected_status(url, other.as_u16(), &body)),
        }

        parse_summary(url, &body)
    }
}

#[async_trait]
impl TodayProvider for ApiClient {
    async fn fetch_today(&self) -> Result<TodaySummary, ApiError> {
        self.today().await
    }
}

/// Builds the static request headers.
fn build_headers(params: &ApiParams) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let auth_value = format!("Basic {}", STANDARD.encode(params.key.expose()));
    let mut auth_value = HeaderValue::from_str(&auth_value)
        .map_err(|e| ApiError::Config(format!("invalid api key header: {e}")))?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);

    if let Some(hostname) = params.network.hostname.as_deref() {
        let value = HeaderValue::from_str(hostname)
            .map_err(|e| ApiError::Config(format!("invalid hostname {hostname:?}: {e}")))?;
        headers.insert(HeaderName::from_static(MACHINE_NAME_HEADER), value);
    }

    Ok(headers)
}

/// Parses a 200 response body into a summary.
fn parse_summary(url: &str, body: &str) -> Result<TodaySummary, ApiError> {
    let response: StatusBarResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse status bar response");
        ApiError::Api(format!("failed to parse results from {url:?}: {e}"))
    })?;

    let summary = response.data.into_summary();
    summary
        .validate()
        .map_err(|e| ApiError::Api(format!("invalid summary from {url:?}: {e}")))?;

    debug!(
        total = %summary.total,
        categories = summary.categories.len(),
        "Parsed today's summary"
    );
    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================
