//! Dashboard configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::ModuleId;
use crate::traits::{BuiltinCatalog, CatalogSource, TomlCatalogFile};

/// Top-level medcof configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedcofConfig {
    /// Catalog TOML file. `None` uses the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Animation tick period in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Module to open on; unknown ids fall back to the first module.
    #[serde(default)]
    pub initial_module: Option<ModuleId>,
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for MedcofConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            frame_interval_ms: default_frame_interval_ms(),
            initial_module: None,
        }
    }
}

impl MedcofConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// The catalog source this configuration points at.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog {
            Some(path) => Box::new(TomlCatalogFile::new(path.clone())),
            None => Box::new(BuiltinCatalog),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim; a `${...}` inside a value is not
/// expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `medcof.toml` in the current directory
/// 2. `~/.config/medcof/config.toml`
///
/// `MEDCOF_CATALOG` overrides the catalog path.
pub fn load_config_from(path: Option<&Path>) -> Result<MedcofConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("medcof.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => MedcofConfig::default(),
    };

    if let Ok(catalog) = std::env::var("MEDCOF_CATALOG") {
        if catalog.trim().is_empty() {
            tracing::warn!("ignoring empty MEDCOF_CATALOG");
        } else {
            config.catalog = Some(PathBuf::from(catalog));
        }
    }

    config.catalog = config
        .catalog
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

/// Parse a config TOML string.
pub fn parse_config_str(content: &str) -> Result<MedcofConfig> {
    let config: MedcofConfig = toml::from_str(content)?;
    if config.frame_interval_ms == 0 {
        anyhow::bail!("frame_interval_ms must be at least 1");
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("medcof"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MEDCOF_TEST_VAR", "catalogs");
        assert_eq!(resolve_env_vars("${_MEDCOF_TEST_VAR}"), "catalogs");
        assert_eq!(
            resolve_env_vars("/srv/${_MEDCOF_TEST_VAR}/main.toml"),
            "/srv/catalogs/main.toml"
        );
        assert_eq!(resolve_env_vars("no vars ${unterminated"), "no vars ${unterminated");
        std::env::remove_var("_MEDCOF_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_MEDCOF_SELF_REF", "${_MEDCOF_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_MEDCOF_SELF_REF}/x.toml"),
            "${_MEDCOF_SELF_REF}/x.toml"
        );
        std::env::set_var("_MEDCOF_OUTER", "${_MEDCOF_INNER}");
        std::env::set_var("_MEDCOF_INNER", "never");
        assert_eq!(
            resolve_env_vars("${_MEDCOF_OUTER}-${_MEDCOF_INNER}"),
            "${_MEDCOF_INNER}-never"
        );
        std::env::remove_var("_MEDCOF_SELF_REF");
        std::env::remove_var("_MEDCOF_OUTER");
        std::env::remove_var("_MEDCOF_INNER");
    }

    #[test]
    fn default_config() {
        let config = MedcofConfig::default();
        assert!(config.catalog.is_none());
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert!(config.initial_module.is_none());
        assert_eq!(config.catalog_source().describe(), "built-in catalog");
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config_str(
            r#"
catalog = "catalogs/usmle.toml"
frame_interval_ms = 33
initial_module = 2
"#,
        )
        .unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("catalogs/usmle.toml")));
        assert_eq!(config.frame_interval_ms, 33);
        assert_eq!(config.initial_module, Some(ModuleId(2)));
        assert_eq!(config.catalog_source().describe(), "catalogs/usmle.toml");
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        assert!(parse_config_str("frame_interval_ms = 0").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/medcof.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medcof.toml");
        std::fs::write(&path, "initial_module = 5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.initial_module, Some(ModuleId(5)));
        assert_eq!(config.frame_interval_ms, 16);
    }
}
