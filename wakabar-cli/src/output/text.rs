//! Plain text rendering for status bars.

use wakabar_core::TodaySummary;

use super::{RenderError, TodayRenderer};

/// Separator between category entries.
const CATEGORY_SEPARATOR: &str = ", ";

/// Plain text formatter.
///
/// Status bars display raw text, so no colors are emitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self
    }

    /// Formats the category breakdown: `"2 hrs Coding, 5 mins Debugging"`.
    fn format_categories(summary: &TodaySummary) -> String {
        summary
            .categories
            .iter()
            .map(|c| format!("{} {}", c.text.trim(), c.name.trim()))
            .collect::<Vec<_>>()
            .join(CATEGORY_SEPARATOR)
    }
}

impl TodayRenderer for TextFormatter {
    fn render_today(
        &self,
        summary: &TodaySummary,
        hide_categories: bool,
    ) -> Result<String, RenderError> {
        if summary.is_empty() {
            return Err(RenderError::Empty);
        }

        let output = if hide_categories || !summary.has_categories() {
            summary.total.trim().to_string()
        } else {
            Self::format_categories(summary)
        };

        if output.is_empty() {
            return Err(RenderError::Empty);
        }
        Ok(output)
    }
}
