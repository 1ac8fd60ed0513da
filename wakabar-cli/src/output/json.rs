//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use wakabar_core::{CategoryTotal, SummaryRange, TodaySummary};

use super::{RenderError, TextFormatter, TodayRenderer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for today's summary.
/// Keys are snake_case at every level, matching the summary types.
#[derive(Debug, Serialize)]
struct TodayOutput<'a> {
    /// The same line the text renderer would print.
    text: String,
    total: &'a str,
    total_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [CategoryTotal]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<&'a SummaryRange>,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        Ok(self.to_json(data)?)
    }

    fn to_json<T: Serialize>(&self, data: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        }
    }
}

impl TodayRenderer for JsonFormatter {
    fn render_today(
        &self,
        summary: &TodaySummary,
        hide_categories: bool,
    ) -> Result<String, RenderError> {
        let text = TextFormatter::new().render_today(summary, hide_categories)?;
        let output = TodayOutput {
            text,
            total: summary.total.trim(),
            total_seconds: summary.total_seconds,
            categories: (!hide_categories).then_some(summary.categories.as_slice()),
            range: summary.range.as_ref(),
        };
        Ok(self.to_json(&output)?)
    }
}
