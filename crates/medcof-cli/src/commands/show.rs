//! The `medcof show` command.

use std::sync::Arc;

use anyhow::Result;

use medcof_core::animator::ANIMATION_DURATION;
use medcof_core::traits::ManualClock;
use medcof_core::{Dashboard, ModuleId};

use super::search::results_table;
use super::{GlobalArgs, OutputFormat};

pub fn execute(
    global: &GlobalArgs,
    module: Option<u32>,
    submodule: Option<usize>,
    query: Option<String>,
    format: String,
) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let (config, catalog) = global.load()?;

    // A manual clock lets the snapshot show the counters after they settle.
    let clock = ManualClock::default();
    let mut dashboard =
        Dashboard::with_clock(catalog, Arc::new(clock.clone()), config.initial_module);

    if let Some(id) = module {
        dashboard.select_module(ModuleId(id))?;
    }
    if let Some(index) = submodule {
        let id = dashboard.active_module_id();
        dashboard.select_submodule(id, index)?;
    }
    if let Some(q) = query {
        dashboard.set_query(q);
    }

    clock.advance(ANIMATION_DURATION);
    dashboard.tick_stats();
    let snapshot = dashboard.snapshot();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => {
            println!("Sua próxima sessão de estudos: {}", snapshot.next_session);
            println!();
            println!("{}", snapshot.active_module_title);
            println!(
                "  Materiais: {}  Flashcards: {}  Submódulos: {}",
                snapshot.stats.materials, snapshot.stats.flashcards, snapshot.stats.classes
            );
            println!("  Estudando: {}", snapshot.current_submodule.title);

            let carousel: Vec<String> = snapshot
                .carousel
                .iter()
                .map(|s| {
                    if s.active {
                        format!("[{}]", s.title)
                    } else {
                        s.title.clone()
                    }
                })
                .collect();
            println!("  {}", carousel.join(" · "));
            println!();

            println!("{} ({})", snapshot.heading, snapshot.result_count);
            match &snapshot.empty_message {
                Some(message) => println!("{message}"),
                None => println!("{}", results_table(&snapshot.results)),
            }
        }
    }

    Ok(())
}
