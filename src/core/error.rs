//! Failures surfaced to callers once every fallback tier is exhausted.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// Neither the live catalog nor the bundled snapshot could be read.
    #[error("Indicator catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No live series and no synthetic series could be produced.
    #[error("Series unavailable for {code}: {reason}")]
    SeriesUnavailable { code: String, reason: String },

    /// The amount entered for a peso indicator is missing or not positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The resolved current value cannot be displayed or divided by.
    #[error("Invalid current value for {code}: {value}")]
    InvalidValue { code: String, value: f64 },

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),
}

impl IndicatorError {
    pub fn series_unavailable(code: &str, reason: impl Into<String>) -> Self {
        IndicatorError::SeriesUnavailable {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}
