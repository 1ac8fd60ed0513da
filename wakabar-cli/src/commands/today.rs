//! Today command - today's coding activity for the status bar.
//!
//! [`fetch_and_render`] runs the load → connect → fetch → render sequence
//! and wraps each failure with the step that failed. [`run`] calls it once,
//! prints the line on success, and otherwise maps the error to an exit code
//! and message.

use std::io::Write;

use clap::Args;
use thiserror::Error;
use tracing::debug;
use wakabar_core::ApiParams;
use wakabar_fetch::{ApiClient, ApiError, TodayProvider};
use wakabar_store::{ConfigParamsLoader, ParamsError, ParamsLoader};

use crate::output::{JsonFormatter, RenderError, TextFormatter, TodayRenderer};
use crate::{Cli, ExitCode, OutputFormat};

/// Where users find their API key.
const API_KEY_URL: &str = "wakatime.com/api-key";

/// Arguments for the today command.
#[derive(Args, Debug, Default)]
pub struct TodayArgs {
    /// Show only the grand total, without the category breakdown.
    #[arg(long)]
    pub hide_categories: bool,
}

// ============================================================================
// Errors
// ============================================================================

/// A failed step of the today command.
///
/// The fetch variant keeps the [`ApiError`] intact so [`run`] can classify
/// it. Failures in every other step are unclassified.
#[derive(Debug, Error)]
pub enum TodayError {
    /// Loading API parameters failed.
    #[error("failed to load API parameters: {0}")]
    LoadParams(#[source] ParamsError),

    /// The API client could not be constructed.
    #[error("failed to initialize api client: {0}")]
    InitClient(#[source] ApiError),

    /// The API call failed.
    #[error("failed fetching today from api: {0}")]
    Fetch(#[source] ApiError),

    /// The summary could not be rendered.
    #[error("failed generating today output: {0}")]
    Render(#[source] RenderError),
}

/// Exit code and user-facing message for a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TodayFailure {
    /// Process exit code.
    pub code: ExitCode,
    /// Message for the user.
    pub message: String,
}

impl TodayFailure {
    fn new(code: ExitCode, message: String) -> Self {
        Self { code, message }
    }
}

impl From<&TodayError> for TodayFailure {
    /// First match wins. The order is part of the command's contract.
    fn from(err: &TodayError) -> Self {
        match err {
            TodayError::Fetch(auth @ ApiError::Auth { .. }) => Self::new(
                ExitCode::ErrAuth,
                format!("today fetch failed: invalid api key... find yours at {API_KEY_URL}. {auth}"),
            ),
            TodayError::Fetch(ApiError::Api(_)) => Self::new(
                ExitCode::ErrApi,
                format!("today fetch failed: api error: {err}"),
            ),
            TodayError::Fetch(ApiError::Backoff { .. }) => Self::new(
                ExitCode::ErrBackoff,
                format!("today fetch failed: rate limited: {err}"),
            ),
            TodayError::Fetch(ApiError::BadRequest { .. }) => Self::new(
                ExitCode::ErrGeneric,
                format!("today fetch failed: bad request: {err}"),
            ),
            _ => Self::new(ExitCode::ErrGeneric, format!("today fetch failed: {err}")),
        }
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// Loads parameters, fetches today's summary and renders it.
///
/// `connect` builds the API client; production code passes
/// [`ApiClient::new`].
///
/// # Errors
///
/// Returns the [`TodayError`] of the first step that failed.
pub async fn fetch_and_render<L, F, C, R>(
    loader: &L,
    connect: F,
    renderer: &R,
) -> Result<String, TodayError>
where
    L: ParamsLoader,
    F: FnOnce(&ApiParams) -> Result<C, ApiError>,
    C: TodayProvider,
    R: TodayRenderer,
{
    let api_params = loader.load_api_params().map_err(TodayError::LoadParams)?;
    let status_bar = loader.load_status_bar_params();

    let client = connect(&api_params).map_err(TodayError::InitClient)?;

    let summary = client.fetch_today().await.map_err(TodayError::Fetch)?;

    renderer
        .render_today(&summary, status_bar.hide_categories)
        .map_err(TodayError::Render)
}

/// Runs the today command once and writes the rendered line to `out`.
///
/// Nothing is written on failure; the returned [`TodayFailure`] carries the
/// exit code and message for the caller to report.
///
/// # Errors
///
/// Returns a [`TodayFailure`] if any step fails or `out` cannot be written.
pub async fn run<L, F, C, R, W>(
    loader: &L,
    connect: F,
    renderer: &R,
    out: &mut W,
) -> Result<ExitCode, TodayFailure>
where
    L: ParamsLoader,
    F: FnOnce(&ApiParams) -> Result<C, ApiError>,
    C: TodayProvider,
    R: TodayRenderer,
    W: Write,
{
    let output = fetch_and_render(loader, connect, renderer)
        .await
        .map_err(|e| TodayFailure::from(&e))?;

    debug!("successfully fetched today for status bar");
    writeln!(out, "{output}").map_err(|e| {
        TodayFailure::new(
            ExitCode::ErrGeneric,
            format!("today fetch failed: failed writing output: {e}"),
        )
    })?;

    Ok(ExitCode::Success)
}

/// Runs the today command against the real config file, API and stdout.
pub async fn execute(args: &TodayArgs, cli: &Cli) -> Result<ExitCode, TodayFailure> {
    let loader = ConfigParamsLoader::new(cli.config_path(), cli.overrides(args.hide_categories));
    let mut stdout = std::io::stdout();

    match cli.format {
        OutputFormat::Text => {
            run(&loader, ApiClient::new, &TextFormatter::new(), &mut stdout).await
        }
        OutputFormat::Json => {
            run(&loader, ApiClient::new, &JsonFormatter::new(false), &mut stdout).await
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
