//! Dashboard error types.
//!
//! Selection errors are recoverable: the caller rejects the user action and
//! the state stays as it was. Catalog integrity errors are raised once, at
//! load time, and mean the dashboard cannot be served at all.

use thiserror::Error;

use crate::model::ModuleId;

/// Errors returned by selection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No module in the catalog has this identifier.
    #[error("unknown module id: {0}")]
    InvalidReference(ModuleId),

    /// The submodule index is outside `[0, len)` for its module.
    #[error("submodule index {index} out of range for module {module_id} ({len} submodules)")]
    IndexOutOfRange {
        module_id: ModuleId,
        index: usize,
        len: usize,
    },
}

/// A catalog that violates the invariants the view-model relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIntegrityError {
    /// The catalog has no modules, so there is nothing to select.
    #[error("catalog has no modules")]
    Empty,

    /// Two modules share an identifier.
    #[error("duplicate module id: {0}")]
    DuplicateId(ModuleId),

    /// A module has no submodules.
    #[error("module {id} ({title}) has no submodules")]
    NoSubmodules { id: ModuleId, title: String },
}
