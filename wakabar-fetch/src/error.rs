//! API error types.

use thiserror::Error;

/// Maximum number of response body bytes kept in error messages.
const BODY_EXCERPT_LEN: usize = 512;

/// Error type for API operations.
///
/// Each variant is a distinct failure class; callers decide exit codes and
/// messages by matching on the variant, never on the message text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the API key.
    #[error("authentication failed at {url:?}. body: {body:?}")]
    Auth {
        /// Request URL.
        url: String,
        /// Response body excerpt.
        body: String,
    },

    /// The server answered with an unexpected status or an unreadable body.
    #[error("{0}")]
    Api(String),

    /// Rate limited by the server.
    #[error(
        "too many requests at {url:?}{}",
        .retry_after.map(|s| format!(", retry after {s} seconds")).unwrap_or_default()
    )]
    Backoff {
        /// Request URL.
        url: String,
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after: Option<u64>,
    },

    /// The server considered the request malformed.
    #[error("bad request at {url:?}. body: {body:?}")]
    BadRequest {
        /// Request URL.
        url: String,
        /// Response body excerpt.
        body: String,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("failed to make request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client could not be configured from the given parameters.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Builds an `Auth` error, truncating the body.
    pub fn auth(url: impl Into<String>, body: &str) -> Self {
        Self::Auth {
            url: url.into(),
            body: excerpt(body),
        }
    }

    /// Builds a `BadRequest` error, truncating the body.
    pub fn bad_request(url: impl Into<String>, body: &str) -> Self {
        Self::BadRequest {
            url: url.into(),
            body: excerpt(body),
        }
    }

    /// Builds an `Api` error for an unexpected status code.
    pub fn unexpected_status(url: &str, status: u16, body: &str) -> Self {
        Self::Api(format!(
            "invalid response status from {url:?}. got: {status}, want: 200. body: {:?}",
            excerpt(body)
        ))
    }
}

/// Truncates a response body on a char boundary.
fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let mut end = BODY_EXCERPT_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

// ============================================================================
// Tests
// ============================================================================
