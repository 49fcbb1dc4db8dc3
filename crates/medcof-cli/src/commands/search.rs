//! The `medcof search` command.

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use medcof_core::search::SearchResult;
use medcof_core::traits::SystemClock;
use medcof_core::{Dashboard, ModuleId};

use super::{GlobalArgs, OutputFormat};

pub fn execute(
    global: &GlobalArgs,
    query: String,
    module: Option<u32>,
    format: String,
) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let (config, catalog) = global.load()?;

    let mut dashboard =
        Dashboard::with_clock(catalog, Arc::new(SystemClock), config.initial_module);
    if let Some(id) = module {
        dashboard.select_module(ModuleId(id))?;
    }
    dashboard.set_query(query);

    let results = dashboard.filtered_submodules();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            println!(
                "{} ({})",
                dashboard.section_heading(),
                dashboard.result_count_label()
            );
            match dashboard.empty_message() {
                Some(message) => println!("{message}"),
                None => println!("{}", results_table(&results)),
            }
        }
    }

    Ok(())
}

/// Result cards as a table: badge, title, duration, anchor.
pub fn results_table(results: &[SearchResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "Aula", "Duração", "Anchor"]);
    for r in results {
        table.add_row(vec![
            Cell::new(r.badge()),
            Cell::new(&r.title),
            Cell::new(&r.duration),
            Cell::new(r.anchor()),
        ]);
    }
    table
}
