use super::ui;
use crate::core::format::format_value;
use crate::core::{Catalog, Session};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(session: &mut Session) -> Result<()> {
    let pb = ui::new_spinner("Loading indicators…");
    let catalog = session.load_catalog().await;
    pb.finish_and_clear();

    let catalog = catalog?;
    println!("{}", ui::style_text("Indicators", ui::StyleType::Title));
    println!("{}", display_catalog(&catalog));
    println!("{}", ui::status_badge(&session.source_state(), ""));
    Ok(())
}

/// Renders the catalog sorted by label, one indicator per row.
pub fn display_catalog(catalog: &Catalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Indicator"),
        ui::header_cell("Code"),
        ui::header_cell("Unit"),
        ui::header_cell("Current value"),
        ui::header_cell("Amount"),
    ]);

    for indicator in catalog.sorted_by_label() {
        table.add_row(vec![
            Cell::new(&indicator.name),
            Cell::new(&indicator.code),
            Cell::new(&indicator.unit_label),
            ui::value_cell(format_value(indicator.unit, indicator.current_value)),
            Cell::new(if indicator.requires_amount() {
                "CLP"
            } else {
                "-"
            }),
        ]);
    }

    table.to_string()
}
