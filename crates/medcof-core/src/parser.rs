//! TOML catalog parser.
//!
//! Loads module catalogs from TOML files and reports non-fatal issues.
//! Structural problems (no modules, duplicate ids, empty modules) are
//! rejected by [`Catalog::new`] and surface as [`CatalogIntegrityError`].
//!
//! [`CatalogIntegrityError`]: crate::error::CatalogIntegrityError

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{Module, ModuleId, ModuleStats, Submodule};

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    modules: Vec<TomlModule>,
}

#[derive(Debug, Deserialize)]
struct TomlModule {
    id: u32,
    title: String,
    #[serde(default)]
    stats: TomlStats,
    #[serde(default)]
    submodules: Vec<TomlSubmodule>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlStats {
    #[serde(default)]
    materials: u32,
    #[serde(default)]
    flashcards: u32,
}

#[derive(Debug, Deserialize)]
struct TomlSubmodule {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration: String,
}

/// Parse a single TOML file into a validated `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a validated `Catalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let modules = parsed
        .modules
        .into_iter()
        .map(|m| Module {
            id: ModuleId(m.id),
            title: m.title,
            stats: ModuleStats {
                materials: m.stats.materials,
                flashcards: m.stats.flashcards,
            },
            submodules: m
                .submodules
                .into_iter()
                .map(|s| Submodule {
                    title: s.title,
                    description: s.description,
                    duration: s.duration,
                })
                .collect(),
        })
        .collect();

    let catalog = Catalog::new(modules)
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;
    Ok(catalog)
}

/// Serialize a catalog back to the TOML layout `parse_catalog_str` reads.
pub fn catalog_to_toml(catalog: &Catalog) -> Result<String> {
    #[derive(serde::Serialize)]
    struct Out<'a> {
        modules: &'a [Module],
    }

    toml::to_string_pretty(&Out {
        modules: catalog.list_modules(),
    })
    .context("failed to serialize catalog")
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The module the warning refers to.
    pub module_id: ModuleId,
    /// The submodule index, when the warning is about a single submodule.
    pub submodule_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a catalog for content that is legal but probably a mistake.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for module in catalog.list_modules() {
        if module.title.trim().is_empty() {
            warnings.push(ValidationWarning {
                module_id: module.id,
                submodule_index: None,
                message: "module title is empty".into(),
            });
        }

        let mut seen_titles = HashSet::new();
        for (idx, sub) in module.submodules.iter().enumerate() {
            if sub.title.trim().is_empty() {
                warnings.push(ValidationWarning {
                    module_id: module.id,
                    submodule_index: Some(idx),
                    message: "submodule title is empty".into(),
                });
            } else if !seen_titles.insert(sub.title.as_str()) {
                warnings.push(ValidationWarning {
                    module_id: module.id,
                    submodule_index: Some(idx),
                    message: format!("duplicate submodule title: {}", sub.title),
                });
            }

            if sub.duration.trim().is_empty() {
                warnings.push(ValidationWarning {
                    module_id: module.id,
                    submodule_index: Some(idx),
                    message: "submodule has no duration".into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogIntegrityError;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[modules]]
id = 10
title = "Endocrinologia"

[modules.stats]
materials = 22
flashcards = 41

[[modules.submodules]]
title = "Tireoide 1"
description = "Hipo e hipertireoidismo."
duration = "25 min"

[[modules.submodules]]
title = "Tireoide 2"
duration = "20 min"

[[modules]]
id = 11
title = "Nefrologia"

[[modules.submodules]]
title = "Distúrbios ácido-base"
duration = "50 min"
"#;

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.len(), 2);

        let endo = catalog.get_module(ModuleId(10)).unwrap();
        assert_eq!(endo.title, "Endocrinologia");
        assert_eq!(endo.stats.materials, 22);
        assert_eq!(endo.submodules.len(), 2);
        assert_eq!(endo.submodules[1].description, "");

        let nefro = catalog.get_module(ModuleId(11)).unwrap();
        assert_eq!(nefro.stats, ModuleStats::default());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_catalog_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn module_without_submodules_is_an_integrity_error() {
        let toml = r#"
[[modules]]
id = 1
title = "Vazio"
"#;
        let err = parse_catalog_str(toml, &PathBuf::from("empty.toml")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogIntegrityError>(),
            Some(&CatalogIntegrityError::NoSubmodules {
                id: ModuleId(1),
                title: "Vazio".into(),
            })
        );
    }

    #[test]
    fn file_without_modules_is_an_integrity_error() {
        let err = parse_catalog_str("", &PathBuf::from("blank.toml")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogIntegrityError>(),
            Some(&CatalogIntegrityError::Empty)
        );
    }

    #[test]
    fn builtin_catalog_survives_toml() {
        let builtin = Catalog::builtin();
        let toml = catalog_to_toml(&builtin).unwrap();
        let parsed = parse_catalog_str(&toml, &PathBuf::from("builtin.toml")).unwrap();
        assert_eq!(parsed, builtin);
    }

    #[test]
    fn validate_flags_suspicious_content() {
        let toml = r#"
[[modules]]
id = 1
title = " "

[[modules.submodules]]
title = "Aula"
duration = "10 min"

[[modules.submodules]]
title = "Aula"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message == "module title is empty"));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate submodule title")
                && w.submodule_index == Some(1)));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no duration") && w.submodule_index == Some(1)));
    }

    #[test]
    fn builtin_catalog_has_no_warnings() {
        assert!(validate_catalog(&Catalog::builtin()).is_empty());
    }

    #[test]
    fn load_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("catalog.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let catalog = parse_catalog(&file_path).unwrap();
        assert_eq!(catalog.first_module().id, ModuleId(10));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = parse_catalog(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/catalog.toml"));
    }
}
