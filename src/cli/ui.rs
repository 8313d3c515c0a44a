use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::SourceState;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    ResultValue,
    Live,
    Local,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::ResultValue => style(text).green().bold(),
        StyleType::Live => style(text).green(),
        StyleType::Local => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned cell for numeric values.
pub fn value_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Plain text of the live/local badge, without styling.
pub fn status_label(state: &SourceState) -> &'static str {
    if state.is_live() {
        "● Live data"
    } else {
        "● Local data"
    }
}

/// Badge telling whether the data shown came from the live API.
pub fn status_badge(state: &SourceState, message: &str) -> String {
    let label = status_label(state);
    let badge = if state.is_live() {
        style_text(label, StyleType::Live)
    } else {
        style_text(label, StyleType::Local)
    };
    if message.is_empty() {
        badge
    } else {
        format!("{badge} {}", style_text(message, StyleType::Subtle))
    }
}

/// Horizontal bar scaled between `min` and `max`. A flat range fills half the width.
pub fn bar(value: f64, min: f64, max: f64, width: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let fraction = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    // Keep at least one block so every row shows a bar.
    let filled = ((fraction * (width - 1) as f64).round() as usize + 1).min(width);
    "█".repeat(filled)
}

/// Creates a spinner shown while data is being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
