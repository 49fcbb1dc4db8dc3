//! The `medcof modules` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use medcof_core::ModuleId;

use super::{GlobalArgs, OutputFormat};

#[derive(Serialize)]
struct ModuleRow<'a> {
    id: ModuleId,
    title: &'a str,
    materials: u32,
    flashcards: u32,
    submodules: usize,
}

pub fn execute(global: &GlobalArgs, format: String) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let (_config, catalog) = global.load()?;

    let rows: Vec<ModuleRow<'_>> = catalog
        .list_modules()
        .iter()
        .map(|m| ModuleRow {
            id: m.id,
            title: &m.title,
            materials: m.stats.materials,
            flashcards: m.stats.flashcards,
            submodules: m.submodules.len(),
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["ID", "Module", "Materiais", "Flashcards", "Submódulos"]);
            for row in &rows {
                table.add_row(vec![
                    Cell::new(row.id),
                    Cell::new(row.title),
                    Cell::new(row.materials),
                    Cell::new(row.flashcards),
                    Cell::new(row.submodules),
                ]);
            }
            println!("{table}");
            println!(
                "{} modules, {} submodules",
                catalog.len(),
                catalog.submodule_count()
            );
        }
    }

    Ok(())
}
