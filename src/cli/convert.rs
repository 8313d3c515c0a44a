use super::ui;
use crate::core::chart::ChartDataset;
use crate::core::{Conversion, Session};
use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Color};

const BAR_WIDTH: usize = 30;

pub async fn run(session: &mut Session, code: &str, raw_amount: Option<&str>) -> Result<()> {
    let pb = ui::new_spinner("Loading data…");
    let conversion = session.evaluate_conversion(code, raw_amount).await;
    pb.finish_and_clear();

    let conversion = conversion?;
    println!("{}", display_result(&conversion));
    println!();
    println!("{}", display_chart(&conversion.chart()));

    let updated = format!("Updated: {}", Local::now().format("%H:%M:%S"));
    println!("{}", ui::status_badge(&session.source_state(), &updated));
    Ok(())
}

/// Result line, e.g. `Result: US$ 23,81 (current value: $1.050)`.
pub fn display_result(conversion: &Conversion) -> String {
    let title = ui::style_text(&conversion.indicator.label(), ui::StyleType::Title);
    let line = conversion
        .display
        .summary_with(|result| ui::style_text(result, ui::StyleType::ResultValue));
    format!("{title}\n{line}")
}

/// Table of the dataset points, oldest first, with values rendered by the
/// dataset's own axis hook.
pub fn display_chart(dataset: &ChartDataset) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("Value ({})", dataset.unit)),
        ui::header_cell(&dataset.title),
    ]);

    let (min, max) = dataset.range().unwrap_or((0.0, 0.0));
    for (label, value) in dataset.iter() {
        table.add_row(vec![
            Cell::new(label),
            ui::value_cell(dataset.axis_label(value)),
            Cell::new(ui::bar(value, min, max, BAR_WIDTH)).fg(Color::Red),
        ]);
    }

    table.to_string()
}
