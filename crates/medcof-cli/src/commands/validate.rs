//! The `medcof validate` command.

use std::path::PathBuf;

use anyhow::Result;

use medcof_core::parser::{parse_catalog, validate_catalog};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalog = parse_catalog(&catalog_path)?;

    println!(
        "Catalog: {} ({} modules, {} submodules)",
        catalog_path.display(),
        catalog.len(),
        catalog.submodule_count()
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = match w.submodule_index {
            Some(idx) => format!("  [{}#{idx}]", w.module_id),
            None => format!("  [{}]", w.module_id),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
