// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # wakabar Store
//!
//! Configuration for wakabar.
//!
//! This crate provides:
//!
//! - **Config**: the JSON config file
//! - **ParamsLoader**: resolves API and status bar parameters from
//!   command-line overrides and the config file
//!
//! ## Usage
//!
//! ```ignore
//! use wakabar_store::{Config, ConfigParamsLoader, ParamOverrides, ParamsLoader};
//!
//! let loader = ConfigParamsLoader::new(Config::default_path(), ParamOverrides::default());
//! let api = loader.load_api_params()?;
//! let status_bar = loader.load_status_bar_params();
//! ```

pub mod config;
pub mod error;
pub mod params;

pub use config::{default_config_dir, Config};
pub use error::StoreError;
pub use params::{
    resolve_api_params, resolve_status_bar_params, ConfigParamsLoader, ParamOverrides,
    ParamsError, ParamsLoader,
};
