//! The `medcof init` command.

use std::path::Path;

use anyhow::Result;

use medcof_core::parser::catalog_to_toml;
use medcof_core::Catalog;

pub fn execute() -> Result<()> {
    if Path::new("medcof.toml").exists() {
        println!("medcof.toml already exists, skipping.");
    } else {
        std::fs::write("medcof.toml", SAMPLE_CONFIG)?;
        println!("Created medcof.toml");
    }

    let catalog_path = Path::new("catalog.toml");
    if catalog_path.exists() {
        println!("catalog.toml already exists, skipping.");
    } else {
        let toml = catalog_to_toml(&Catalog::builtin())?;
        std::fs::write(catalog_path, format!("{CATALOG_HEADER}{toml}"))?;
        println!("Created catalog.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit catalog.toml with your modules");
    println!("  2. Run: medcof validate --file catalog.toml");
    println!("  3. Run: medcof show");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# medcof configuration

catalog = "catalog.toml"
frame_interval_ms = 16
# initial_module = 1
"#;

const CATALOG_HEADER: &str = "# medcof catalog: one [[modules]] table per module, lessons in order.\n\n";
