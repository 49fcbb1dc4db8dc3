//! Seams between the view-model and its environment.
//!
//! The dashboard reads time through a [`Clock`] and obtains its catalog
//! through a [`CatalogSource`], so both can be swapped in tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::catalog::Catalog;
use crate::parser::parse_catalog;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic time source used to sample animations.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The process clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Catalog source
// ---------------------------------------------------------------------------

/// Where the dashboard gets its catalog from.
pub trait CatalogSource {
    /// Human-readable description (e.g. a file path).
    fn describe(&self) -> String;

    /// Load and validate the catalog.
    fn load(&self) -> Result<Catalog>;
}

/// The catalog compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }

    fn load(&self) -> Result<Catalog> {
        Ok(Catalog::builtin())
    }
}

/// A catalog TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlCatalogFile {
    pub path: PathBuf,
}

impl TomlCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for TomlCatalogFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog> {
        parse_catalog(&self.path)
    }
}
