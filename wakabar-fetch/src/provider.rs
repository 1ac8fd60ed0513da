//! The seam between the `today` command and the API.

use async_trait::async_trait;
use wakabar_core::TodaySummary;

use crate::error::ApiError;

/// Something that can fetch today's summary.
///
/// Implemented by [`ApiClient`](crate::ApiClient); the `today` command is
/// generic over this trait so tests can substitute a stub.
#[async_trait]
pub trait TodayProvider: Send + Sync {
    /// Fetches today's summary.
    async fn fetch_today(&self) -> Result<TodaySummary, ApiError>;
}
