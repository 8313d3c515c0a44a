//! Unit-aware rendering of indicator values.
//!
//! Local values follow the Chilean convention (`.` groups thousands, `,`
//! separates decimals). Foreign currency values are US dollars in the en-US
//! convention. Every caller, including chart axis and tooltip hooks, goes
//! through [`format_value`] so the same value always renders the same way.

use super::indicator::UnitKind;

/// Rendered for values that are not finite.
pub const PLACEHOLDER: &str = "—";

struct NumberStyle {
    thousands: char,
    decimal: char,
}

const LOCAL: NumberStyle = NumberStyle {
    thousands: '.',
    decimal: ',',
};

const EN_US: NumberStyle = NumberStyle {
    thousands: ',',
    decimal: '.',
};

pub fn format_value(unit: UnitKind, value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    match unit {
        UnitKind::Pesos => with_sign(value, |v| format!("${}", group(v, 0, 0, &LOCAL))),
        UnitKind::Percentage => format!("{}%", format_local(value, 0, 2)),
        UnitKind::ForeignCurrency => with_sign(value, |v| format!("${}", group(v, 2, 2, &EN_US))),
        UnitKind::Generic => format_local(value, 0, 2),
    }
}

/// Local number with exactly two decimals, as used for conversion results.
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format_local(value, 2, 2)
}

fn format_local(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    with_sign(value, |v| group(v, min_fraction, max_fraction, &LOCAL))
}

fn with_sign(value: f64, render: impl Fn(f64) -> String) -> String {
    let body = render(value.abs());
    // A value that rounds to zero never shows a sign.
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{body}")
    } else {
        body
    }
}

/// Rounds half away from zero. `format!` alone would round exact ties to even.
fn round_half_away(value: f64, fraction_digits: usize) -> f64 {
    let factor = 10f64.powi(fraction_digits as i32);
    let scaled = (value * factor).round() / factor;
    if scaled.is_finite() { scaled } else { value }
}

fn group(value: f64, min_fraction: usize, max_fraction: usize, style: &NumberStyle) -> String {
    let value = round_half_away(value, max_fraction);
    let rounded = format!("{value:.max_fraction$}");
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut fraction = frac_part.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + fraction.len() + 1);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(style.thousands);
        }
        out.push(*digit);
    }
    if !fraction.is_empty() {
        out.push(style.decimal);
        out.push_str(&fraction);
    }
    out
}
