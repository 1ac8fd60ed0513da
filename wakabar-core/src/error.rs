//! Core error types for `wakabar`.

use thiserror::Error;

/// Core error type for `wakabar` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No API key was configured.
    #[error("api key not found or empty")]
    MissingApiKey,

    /// The API key does not look like a WakaTime key.
    #[error("invalid api key format")]
    InvalidApiKey,

    /// The API base URL could not be parsed.
    #[error("invalid api url {url:?}: {reason}")]
    InvalidApiUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
