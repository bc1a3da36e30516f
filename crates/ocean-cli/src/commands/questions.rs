//! The `ocean questions` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use ocean_core::model::STATEMENTS;
use ocean_core::render::RATING_HEADER;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Statement", "Trait"]);

    for (index, statement) in STATEMENTS.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(statement.prompt),
            Cell::new(format!(
                "{} ({})",
                statement.trait_code.label(),
                statement.trait_code.code()
            )),
        ]);
    }

    println!("{RATING_HEADER}\n");
    println!("{table}");
    Ok(())
}
