//! The read-only module catalog.
//!
//! A [`Catalog`] can only be obtained through [`Catalog::new`], which checks
//! the invariants everything downstream relies on: at least one module,
//! unique ids, and at least one submodule per module.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CatalogIntegrityError;
use crate::model::{Module, ModuleId, ModuleStats, Submodule};

/// Validated, immutable list of modules in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Validate `modules` and wrap them in a catalog.
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogIntegrityError> {
        if modules.is_empty() {
            return Err(CatalogIntegrityError::Empty);
        }

        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id) {
                return Err(CatalogIntegrityError::DuplicateId(module.id));
            }
            if module.submodules.is_empty() {
                return Err(CatalogIntegrityError::NoSubmodules {
                    id: module.id,
                    title: module.title.clone(),
                });
            }
        }

        tracing::debug!(modules = modules.len(), "catalog loaded");
        Ok(Self { modules })
    }

    /// Look up a module by id.
    pub fn get_module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// All modules, in catalog order.
    pub fn list_modules(&self) -> &[Module] {
        &self.modules
    }

    /// Catalog index of a module; this is also its carousel slide index.
    pub fn position(&self, id: ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    /// The first module. Never fails: construction rejects empty catalogs.
    pub fn first_module(&self) -> &Module {
        &self.modules[0]
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of submodules across every module.
    pub fn submodule_count(&self) -> usize {
        self.modules.iter().map(|m| m.submodules.len()).sum()
    }

    /// The catalog the dashboard ships with.
    pub fn builtin() -> Self {
        let modules = vec![
            builtin_module(
                1,
                "Primeiros Passos",
                (12, 5),
                8,
                |i| {
                    if i == 0 {
                        "O que é o STEP1?".to_string()
                    } else {
                        format!("Aula Introdutória {}", i + 1)
                    }
                },
                "Fundamentos essenciais para iniciar sua preparação com o pé direito nos EUA.",
                "15 min",
            ),
            builtin_module(
                2,
                "Cardiologia",
                (45, 120),
                12,
                |i| format!("Cardiologia Clínica {}", i + 1),
                "Aprofundamento em patologias cardíacas, ECG e manejo clínico avançado.",
                "45 min",
            ),
            builtin_module(
                3,
                "Neurologia",
                (30, 80),
                10,
                |i| format!("Neuroanatomia {}", i + 1),
                "Estruturas do sistema nervoso central e periférico e suas correlações clínicas.",
                "30 min",
            ),
            builtin_module(
                4,
                "Pneumologia",
                (25, 60),
                6,
                |i| format!("Fisiologia Pulmonar {}", i + 1),
                "Mecânica ventilatória, trocas gasosas e interpretação de espirometria.",
                "40 min",
            ),
            builtin_module(
                5,
                "Gastroenterologia",
                (35, 90),
                8,
                |i| format!("Doenças do TGI {}", i + 1),
                "Abordagem completa das doenças esofágicas, gástricas e intestinais.",
                "35 min",
            ),
        ];

        Self { modules }
    }
}

fn builtin_module(
    id: u32,
    title: &str,
    (materials, flashcards): (u32, u32),
    count: usize,
    submodule_title: impl Fn(usize) -> String,
    description: &str,
    duration: &str,
) -> Module {
    Module {
        id: ModuleId(id),
        title: title.to_string(),
        stats: ModuleStats {
            materials,
            flashcards,
        },
        submodules: (0..count)
            .map(|i| Submodule {
                title: submodule_title(i),
                description: description.to_string(),
                duration: duration.to_string(),
            })
            .collect(),
    }
}
