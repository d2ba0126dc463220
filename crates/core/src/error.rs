//! Analytics error model.

use thiserror::Error;

/// Result type used across the analytics layer.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Which boundary of the report window a date belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateField {
    Start,
    Finish,
}

impl DateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateField::Start => "start",
            DateField::Finish => "finish",
        }
    }
}

impl core::fmt::Display for DateField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a whole analytics call.
///
/// Only call-level failures live here. Malformed individual records are
/// filtered out by the engine and never surface as errors, and degenerate
/// arithmetic (zero totals, empty windows) yields `0` for the dependent ratio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A window boundary was not a `dd.mm.yyyy` calendar date.
    #[error("invalid {field} date format: {value:?}")]
    InvalidDate { field: DateField, value: String },

    /// The ledger or sales collection could not be obtained.
    #[error("failed to load {what}: {reason}")]
    UpstreamLoad { what: String, reason: String },
}

impl AnalyticsError {
    pub fn invalid_date(field: DateField, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field,
            value: value.into(),
        }
    }

    pub fn upstream_load(what: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        Self::UpstreamLoad {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the data source.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidDate { .. })
    }
}
