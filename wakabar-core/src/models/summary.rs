//! Today's summary types.
//!
//! - [`TodaySummary`] - Grand total plus per-category breakdown
//! - [`CategoryTotal`] - A single category
//! - [`SummaryRange`] - The day covered by the summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Today Summary
// ============================================================================

/// Aggregated coding activity for the current day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    /// Human-readable grand total (e.g. "3 hrs 12 mins").
    pub total: String,
    /// Grand total in seconds.
    #[serde(default)]
    pub total_seconds: f64,
    /// Per-category breakdown, in the order the API returned it.
    #[serde(default)]
    pub categories: Vec<CategoryTotal>,
    /// The day this summary covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SummaryRange>,
}

impl TodaySummary {
    /// Creates a summary with a grand total and no categories.
    pub fn new(total: impl Into<String>) -> Self {
        Self {
            total: total.into(),
            total_seconds: 0.0,
            categories: Vec::new(),
            range: None,
        }
    }

    /// Sets the grand total in seconds.
    #[must_use]
    pub fn with_total_seconds(mut self, seconds: f64) -> Self {
        self.total_seconds = seconds;
        self
    }

    /// Appends a category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryTotal) -> Self {
        self.categories.push(category);
        self
    }

    /// Returns true if the API reported a category breakdown.
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Returns true if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.total.trim().is_empty() && self.categories.is_empty()
    }

    /// Validates the summary data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if any duration is negative or
    /// non-finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.total_seconds.is_finite() || self.total_seconds < 0.0 {
            return Err(CoreError::InvalidData(format!(
                "grand total seconds out of range: {}",
                self.total_seconds
            )));
        }
        for category in &self.categories {
            category
                .validate()
                .map_err(|e| CoreError::InvalidData(format!("category {:?}: {e}", category.name)))?;
        }
        Ok(())
    }
}

// ============================================================================
// Category Total
// ============================================================================

/// Time spent in a single activity category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name (e.g. "Coding").
    pub name: String,
    /// Human-readable duration (e.g. "2 hrs 5 mins").
    pub text: String,
    /// Duration in seconds.
    #[serde(default)]
    pub total_seconds: f64,
}

impl CategoryTotal {
    /// Creates a category total.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            total_seconds: 0.0,
        }
    }

    /// Sets the duration in seconds.
    #[must_use]
    pub fn with_seconds(mut self, seconds: f64) -> Self {
        self.total_seconds = seconds;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.total_seconds.is_finite() && self.total_seconds >= 0.0 {
            Ok(())
        } else {
            Err(format!("seconds out of range: {}", self.total_seconds))
        }
    }
}

// ============================================================================
// Summary Range
// ============================================================================

/// The day a summary covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryRange {
    /// Calendar date in the user's timezone.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// IANA timezone name used by the server.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Human-readable label (e.g. "Today").
    #[serde(default)]
    pub text: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
