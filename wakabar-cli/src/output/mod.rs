//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use thiserror::Error;
use wakabar_core::TodaySummary;

/// Errors from rendering today's summary.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The summary has neither a grand total nor categories.
    #[error("summary is empty")]
    Empty,

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns today's summary into the single line printed for the status bar.
pub trait TodayRenderer {
    /// Renders the summary, optionally without the category breakdown.
    fn render_today(
        &self,
        summary: &TodaySummary,
        hide_categories: bool,
    ) -> Result<String, RenderError>;
}
