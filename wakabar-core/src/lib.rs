// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `wakabar` Core
//!
//! Core types and models shared by the `wakabar` crates.
//!
//! ## Key Types
//!
//! ### Summary Types
//! - [`TodaySummary`] - Today's coding activity as reported by the API
//! - [`CategoryTotal`] - Time spent in a single category (coding, debugging, ...)
//! - [`SummaryRange`] - The day the summary covers
//!
//! ### Parameter Types
//! - [`ApiParams`] - Everything needed to talk to the API
//! - [`ApiKey`] - A validated API key
//! - [`NetworkParams`] - Timeout, proxy and TLS settings
//! - [`StatusBarParams`] - Display options for the rendered summary

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Parameters
    ApiKey,
    ApiParams,
    NetworkParams,
    StatusBarParams,
    DEFAULT_API_URL,
    DEFAULT_TIMEOUT_SECS,
    // Summary
    CategoryTotal,
    SummaryRange,
    TodaySummary,
};
