//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use medcof_core::config::{load_config_from, MedcofConfig};
use medcof_core::traits::{CatalogSource, TomlCatalogFile};
use medcof_core::Catalog;

pub mod animate;
pub mod init;
pub mod modules;
pub mod search;
pub mod show;
pub mod validate;

/// Options shared by every subcommand.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

impl GlobalArgs {
    /// Load the config, then the catalog it (or `--catalog`) points at.
    pub fn load(&self) -> Result<(MedcofConfig, Catalog)> {
        let config = load_config_from(self.config.as_deref())?;
        let source: Box<dyn CatalogSource> = match &self.catalog {
            Some(path) => Box::new(TomlCatalogFile::new(path.clone())),
            None => config.catalog_source(),
        };
        tracing::debug!(source = %source.describe(), "loading catalog");
        let catalog = source.load()?;
        Ok((config, catalog))
    }
}

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
        }
    }
}
