//! Active module / submodule selection.
//!
//! Two fields, two mutators. Every transition is validated before anything
//! is written, so a rejected action leaves the previous selection intact.

use crate::catalog::Catalog;
use crate::error::SelectionError;
use crate::model::{Module, ModuleId, Submodule};

/// Which module and which lesson in it are currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    active_module_id: ModuleId,
    active_submodule_index: usize,
}

impl SelectionState {
    /// Initial selection: first module in catalog order, first lesson.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            active_module_id: catalog.first_module().id,
            active_submodule_index: 0,
        }
    }

    /// Start on `preferred` if the catalog has it, otherwise on the first module.
    pub fn starting_at(catalog: &Catalog, preferred: Option<ModuleId>) -> Self {
        match preferred {
            Some(id) if catalog.get_module(id).is_some() => Self {
                active_module_id: id,
                active_submodule_index: 0,
            },
            Some(id) => {
                tracing::warn!(module_id = %id, "unknown initial module, using first module");
                Self::new(catalog)
            }
            None => Self::new(catalog),
        }
    }

    pub fn active_module_id(&self) -> ModuleId {
        self.active_module_id
    }

    pub fn active_submodule_index(&self) -> usize {
        self.active_submodule_index
    }

    /// Make `id` the active module and rewind to its first lesson.
    pub fn select_module(
        &mut self,
        catalog: &Catalog,
        id: ModuleId,
    ) -> Result<(), SelectionError> {
        if catalog.get_module(id).is_none() {
            return Err(SelectionError::InvalidReference(id));
        }

        tracing::debug!(module_id = %id, "module selected");
        self.active_module_id = id;
        self.active_submodule_index = 0;
        Ok(())
    }

    /// Make lesson `index` of module `id` active, switching modules if needed.
    pub fn select_submodule(
        &mut self,
        catalog: &Catalog,
        id: ModuleId,
        index: usize,
    ) -> Result<(), SelectionError> {
        let module = catalog
            .get_module(id)
            .ok_or(SelectionError::InvalidReference(id))?;
        if index >= module.submodules.len() {
            return Err(SelectionError::IndexOutOfRange {
                module_id: id,
                index,
                len: module.submodules.len(),
            });
        }

        tracing::debug!(module_id = %id, index, "submodule selected");
        self.active_module_id = id;
        self.active_submodule_index = index;
        Ok(())
    }

    /// The active module, falling back to the first module.
    pub fn active_module<'a>(&self, catalog: &'a Catalog) -> &'a Module {
        catalog
            .get_module(self.active_module_id)
            .unwrap_or_else(|| catalog.first_module())
    }

    /// The active lesson. Clamps to the first lesson if the index is stale.
    pub fn current_submodule<'a>(&self, catalog: &'a Catalog) -> &'a Submodule {
        let module = self.active_module(catalog);
        module
            .submodules
            .get(self.active_submodule_index)
            .unwrap_or(&module.submodules[0])
    }
}
