//! Model catalog CLI command.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use polychat_types::model::MODEL_CATALOG;

/// Print the model catalog as a table.
pub fn list_models() {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["ID", "Name", "Tier"]);

    for model in MODEL_CATALOG {
        let tier = if model.premium {
            Cell::new("premium").fg(Color::Yellow)
        } else {
            Cell::new("free").fg(Color::Green)
        };
        table.add_row(vec![Cell::new(model.id), Cell::new(model.name), tier]);
    }

    println!("{table}");
}
