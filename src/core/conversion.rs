//! Converts peso amounts into indicator units and renders current values.

use super::error::IndicatorError;
use super::format::{format_fixed2, format_value};
use super::indicator::{Indicator, SeriesPoint, is_usable_value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayResult {
    /// Converted amount with its symbol, or the formatted current value.
    pub result: String,
    pub converted: Option<f64>,
    pub current_value: f64,
    pub current_value_text: String,
}

impl DisplayResult {
    /// Single line summary suitable for a result box.
    pub fn summary(&self) -> String {
        self.summary_with(str::to_string)
    }

    /// Summary line with `decorate` applied to the result part only.
    pub fn summary_with(&self, decorate: impl Fn(&str) -> String) -> String {
        let result = decorate(&self.result);
        if self.converted.is_some() {
            format!(
                "Result: {} (current value: {})",
                result, self.current_value_text
            )
        } else {
            format!("Current value: {result}")
        }
    }
}

/// Parses a user-entered amount written with `.` thousands and `,` decimals.
///
/// Every `.` is dropped before `,` becomes the decimal point, so `"1.5"`
/// reads as `15`. The amount must be finite and strictly positive.
pub fn parse_amount(raw: &str) -> Result<f64, IndicatorError> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    let amount: f64 = normalized
        .parse()
        .map_err(|_| IndicatorError::InvalidAmount(format!("'{raw}' is not a number")))?;
    validate_amount(amount)
}

fn validate_amount(amount: f64) -> Result<f64, IndicatorError> {
    if is_usable_value(amount) {
        Ok(amount)
    } else {
        Err(IndicatorError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )))
    }
}

/// Symbol shown in front of a converted amount.
pub fn currency_symbol(code: &str) -> &'static str {
    match code {
        "dolar" => "US$",
        "euro" => "€",
        _ => "$",
    }
}

pub fn evaluate(
    indicator: &Indicator,
    amount: Option<f64>,
    series: &[SeriesPoint],
) -> Result<DisplayResult, IndicatorError> {
    let amount = if indicator.requires_amount() {
        let amount = amount.ok_or_else(|| {
            IndicatorError::InvalidAmount(format!("{} requires an amount in CLP", indicator.code))
        })?;
        Some(validate_amount(amount)?)
    } else {
        None
    };

    let latest = series.first().ok_or_else(|| {
        IndicatorError::series_unavailable(&indicator.code, "series has no points")
    })?;
    let current_value = latest.value;
    if !is_usable_value(current_value) {
        return Err(IndicatorError::InvalidValue {
            code: indicator.code.clone(),
            value: current_value,
        });
    }

    let current_value_text = format_value(indicator.unit, current_value);
    let result = match amount {
        Some(amount) => {
            let converted = amount / current_value;
            debug!(
                code = %indicator.code,
                amount, current_value, converted, "Converted amount"
            );
            DisplayResult {
                result: format!(
                    "{} {}",
                    currency_symbol(&indicator.code),
                    format_fixed2(converted)
                ),
                converted: Some(converted),
                current_value,
                current_value_text,
            }
        }
        None => DisplayResult {
            result: current_value_text.clone(),
            converted: None,
            current_value,
            current_value_text,
        },
    };
    Ok(result)
}
