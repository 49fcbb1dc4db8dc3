//! medcof-core: catalog, selection, search, and stat animation.
//!
//! This crate holds the view-model behind the study dashboard: the
//! read-only module catalog, the active module/submodule selection, the
//! search filter, and the animated statistics counters. A presentation
//! layer owns a [`dashboard::Dashboard`] and renders whatever it derives.

pub mod animator;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod driver;
pub mod error;
pub mod model;
pub mod parser;
pub mod search;
pub mod selection;
pub mod traits;

pub use catalog::Catalog;
pub use dashboard::Dashboard;
pub use error::{CatalogIntegrityError, SelectionError};
pub use model::{Module, ModuleId, ModuleStats, StatTriple, Submodule};
