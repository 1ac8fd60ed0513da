//! Domain models for wakabar.
//!
//! ## Submodules
//!
//! - [`params`] - API and status bar parameter bundles
//! - [`summary`] - Today's summary (grand total and category breakdown)

mod params;
mod summary;

pub use params::{
    ApiKey, ApiParams, NetworkParams, StatusBarParams, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS,
};
pub use summary::{CategoryTotal, SummaryRange, TodaySummary};
