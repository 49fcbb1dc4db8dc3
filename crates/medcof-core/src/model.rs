//! Core data model types for medcof.
//!
//! Modules are the top-level study categories; submodules are the lessons
//! inside them. A submodule has no key of its own: it is addressed by its
//! module id and its position in that module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable module identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ModuleId)
            .map_err(|_| format!("invalid module id: '{s}'"))
    }
}

impl From<u32> for ModuleId {
    fn from(id: u32) -> Self {
        ModuleId(id)
    }
}

/// A top-level content category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier within the catalog.
    pub id: ModuleId,
    /// Display title (e.g. "Cardiologia").
    pub title: String,
    /// Aggregate counters shown on the dashboard.
    pub stats: ModuleStats,
    /// Lessons, in display order.
    pub submodules: Vec<Submodule>,
}

impl Module {
    /// The counters the stat animation converges toward for this module.
    pub fn target_stats(&self) -> StatTriple {
        StatTriple {
            materials: self.stats.materials,
            flashcards: self.stats.flashcards,
            classes: self.submodules.len() as u32,
        }
    }
}

/// Aggregate counters attached to a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStats {
    pub materials: u32,
    pub flashcards: u32,
}

/// A single lesson within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submodule {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form display string such as "15 min"; never parsed.
    #[serde(default)]
    pub duration: String,
}

/// The three counters displayed in the hero section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatTriple {
    pub materials: u32,
    pub flashcards: u32,
    /// Number of submodules in the module.
    pub classes: u32,
}

impl StatTriple {
    pub const ZERO: StatTriple = StatTriple {
        materials: 0,
        flashcards: 0,
        classes: 0,
    };

    pub fn new(materials: u32, flashcards: u32, classes: u32) -> Self {
        Self {
            materials,
            flashcards,
            classes,
        }
    }
}

impl fmt::Display for StatTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "materials={} flashcards={} classes={}",
            self.materials, self.flashcards, self.classes
        )
    }
}
