// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # wakabar Fetch
//!
//! HTTP access to the WakaTime status bar API.
//!
//! - [`http::HttpClient`] - `reqwest` client built from network settings
//! - [`api::ApiClient`] - Fetches today's summary and classifies failures
//! - [`provider::TodayProvider`] - Trait the `today` command is generic over
//! - [`error::ApiError`] - Classified API failures
//!
//! ## Example
//!
//! ```ignore
//! use wakabar_fetch::ApiClient;
//!
//! let client = ApiClient::new(&params)?;
//! let summary = client.today().await?;
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod provider;

pub use api::{ApiClient, TODAY_ENDPOINT};
pub use error::ApiError;
pub use http::{HttpClient, ResponseExt};
pub use provider::TodayProvider;
