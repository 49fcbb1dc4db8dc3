//! Submodule search filter.
//!
//! Short queries browse the active module; longer ones search the whole
//! catalog by module and submodule title. Results come back in catalog
//! order with no ranking.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{ModuleId, Submodule};

/// Minimum query length that switches to catalog-wide search.
///
/// Counted in Unicode scalar values, not UTF-16 units: a single emoji such
/// as "🫀" is one character and still browses.
pub const MIN_QUERY_CHARS: usize = 2;

/// Whether the submodule list is scoped to the active module or the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Browsing,
    Searching,
}

impl SearchMode {
    /// Mode for a raw, untrimmed query.
    pub fn for_query(query: &str) -> Self {
        if query.chars().count() < MIN_QUERY_CHARS {
            SearchMode::Browsing
        } else {
            SearchMode::Searching
        }
    }
}

/// One entry of the visible submodule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub module_id: ModuleId,
    /// Position of the submodule in its module.
    pub original_index: usize,
    /// Title of the owning module; only set for catalog-wide results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_module_title: Option<String>,
}

impl SearchResult {
    fn new(
        sub: &Submodule,
        module_id: ModuleId,
        original_index: usize,
        module_title: Option<&str>,
    ) -> Self {
        Self {
            title: sub.title.clone(),
            description: sub.description.clone(),
            duration: sub.duration.clone(),
            module_id,
            original_index,
            matched_module_title: module_title.map(str::to_string),
        }
    }

    /// DOM-style anchor for the result card, e.g. `submodule-2-0`.
    pub fn anchor(&self) -> String {
        submodule_anchor(self.module_id, self.original_index)
    }

    /// Card badge: the module title when searching, the lesson number otherwise.
    pub fn badge(&self) -> String {
        match &self.matched_module_title {
            Some(title) => title.clone(),
            None => format!("SUBMÓDULO {}", self.original_index + 1),
        }
    }
}

/// Anchor string addressing one submodule.
pub fn submodule_anchor(module_id: ModuleId, index: usize) -> String {
    format!("submodule-{module_id}-{index}")
}

/// Derive the visible submodule list for `query`.
///
/// An unknown `active_module_id` browses the first module.
pub fn filter(catalog: &Catalog, query: &str, active_module_id: ModuleId) -> Vec<SearchResult> {
    match SearchMode::for_query(query) {
        SearchMode::Browsing => {
            let module = catalog
                .get_module(active_module_id)
                .unwrap_or_else(|| catalog.first_module());
            module
                .submodules
                .iter()
                .enumerate()
                .map(|(idx, sub)| SearchResult::new(sub, module.id, idx, None))
                .collect()
        }
        SearchMode::Searching => {
            let needle = query.to_lowercase();
            let mut results = Vec::new();
            for module in catalog.list_modules() {
                let module_matches = module.title.to_lowercase().contains(&needle);
                for (idx, sub) in module.submodules.iter().enumerate() {
                    if module_matches || sub.title.to_lowercase().contains(&needle) {
                        results.push(SearchResult::new(
                            sub,
                            module.id,
                            idx,
                            Some(&module.title),
                        ));
                    }
                }
            }
            tracing::debug!(query, results = results.len(), "catalog search");
            results
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::module;

    #[test]
    fn mode_threshold_is_two_characters() {
        assert_eq!(SearchMode::for_query(""), SearchMode::Browsing);
        assert_eq!(SearchMode::for_query("c"), SearchMode::Browsing);
        assert_eq!(SearchMode::for_query("é"), SearchMode::Browsing);
        assert_eq!(SearchMode::for_query("🫀"), SearchMode::Browsing);
        assert_eq!(SearchMode::for_query("🫀🫁"), SearchMode::Searching);
        assert_eq!(SearchMode::for_query("ca"), SearchMode::Searching);
        assert_eq!(SearchMode::for_query("  "), SearchMode::Searching);
    }

    #[test]
    fn empty_query_browses_active_module() {
        let catalog = Catalog::builtin();
        let results = filter(&catalog, "", ModuleId(2));
        let cardio = catalog.get_module(ModuleId(2)).unwrap();

        assert_eq!(results.len(), 12);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.module_id, ModuleId(2));
            assert_eq!(r.original_index, i);
            assert_eq!(r.title, cardio.submodules[i].title);
            assert!(r.matched_module_title.is_none());
        }
    }

    #[test]
    fn single_character_still_browses() {
        let catalog = Catalog::builtin();
        let results = filter(&catalog, "z", ModuleId(3));
        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| r.module_id == ModuleId(3)));
    }

    #[test]
    fn two_characters_search_the_whole_catalog() {
        let catalog = Catalog::builtin();
        let results = filter(&catalog, "ca", ModuleId(1));

        let cardio: Vec<_> = results
            .iter()
            .filter(|r| r.module_id == ModuleId(2))
            .collect();
        assert_eq!(cardio.len(), 12);
        assert!(cardio
            .iter()
            .all(|r| r.matched_module_title.as_deref() == Some("Cardiologia")));

        for r in &results {
            let module = catalog.get_module(r.module_id).unwrap();
            assert!(
                module.title.to_lowercase().contains("ca")
                    || r.title.to_lowercase().contains("ca"),
                "unexpected match: {}",
                r.title
            );
        }
        // Nothing in "Primeiros Passos" or "Neurologia" contains "ca".
        assert!(results.iter().all(|r| r.module_id == ModuleId(2)));
    }

    #[test]
    fn matching_is_case_insensitive_on_both_titles() {
        let catalog = Catalog::builtin();

        let by_module = filter(&catalog, "NEURO", ModuleId(1));
        assert_eq!(by_module.len(), 10);

        let by_submodule = filter(&catalog, "step1", ModuleId(5));
        assert_eq!(by_submodule.len(), 1);
        assert_eq!(by_submodule[0].module_id, ModuleId(1));
        assert_eq!(by_submodule[0].original_index, 0);
        assert_eq!(
            by_submodule[0].matched_module_title.as_deref(),
            Some("Primeiros Passos")
        );
    }

    #[test]
    fn results_follow_catalog_order() {
        let catalog = Catalog::new(vec![
            module(7, "Zeta", &["Alfa 1", "Beta", "Alfa 2"]),
            module(3, "Alfa", &["Gama", "Delta"]),
        ])
        .unwrap();

        let keys: Vec<_> = filter(&catalog, "alfa", ModuleId(3))
            .iter()
            .map(|r| (r.module_id.0, r.original_index))
            .collect();
        assert_eq!(keys, vec![(7, 0), (7, 2), (3, 0), (3, 1)]);
    }

    #[test]
    fn no_match_is_an_empty_list() {
        let catalog = Catalog::builtin();
        assert!(filter(&catalog, "zzz-no-match", ModuleId(1)).is_empty());
        assert!(filter(&catalog, "zz", ModuleId(1)).is_empty());
    }

    #[test]
    fn query_is_not_trimmed() {
        let catalog = Catalog::builtin();
        // " cardio" does not occur in any title, even though "cardio" does.
        assert!(filter(&catalog, " cardio", ModuleId(1)).is_empty());
    }

    #[test]
    fn unknown_active_module_browses_first() {
        let catalog = Catalog::builtin();
        let results = filter(&catalog, "", ModuleId(99));
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| r.module_id == ModuleId(1)));
    }

    #[test]
    fn anchor_and_badge() {
        let catalog = Catalog::builtin();
        let browsing = &filter(&catalog, "", ModuleId(2))[4];
        assert_eq!(browsing.anchor(), "submodule-2-4");
        assert_eq!(browsing.badge(), "SUBMÓDULO 5");

        let searching = &filter(&catalog, "tgi", ModuleId(2))[0];
        assert_eq!(searching.badge(), "Gastroenterologia");
    }
}
