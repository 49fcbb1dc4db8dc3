//! The dashboard view-model.
//!
//! [`Dashboard`] is the single state object a presentation layer owns. It
//! keeps the primary state (selection, query, displayed counters) and
//! derives everything else on demand, so derived values can never drift
//! from the fields they depend on.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::animator::{RunHandle, StatAnimator};
use crate::catalog::Catalog;
use crate::error::SelectionError;
use crate::model::{Module, ModuleId, StatTriple, Submodule};
use crate::search::{self, submodule_anchor, SearchMode, SearchResult};
use crate::selection::SelectionState;
use crate::traits::{Clock, SystemClock};

/// Delay before scrolling to a freshly selected submodule.
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);

/// How long the selected submodule card stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(3000);

/// Heading shown above catalog-wide search results.
pub const SEARCH_HEADING: &str = "Resultados da Busca";

/// Carousel instruction emitted when a module is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleFocus {
    pub module_id: ModuleId,
    /// Slide to move the carousel to.
    pub slide_index: usize,
}

/// Cosmetic scroll-and-highlight request for a submodule card.
///
/// Purely advisory: dropping it never affects dashboard state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusRequest {
    pub anchor: String,
    pub module_id: ModuleId,
    pub index: usize,
    pub delay: Duration,
    pub highlight: Duration,
}

impl FocusRequest {
    fn new(module_id: ModuleId, index: usize) -> Self {
        Self {
            anchor: submodule_anchor(module_id, index),
            module_id,
            index,
            delay: FOCUS_DELAY,
            highlight: HIGHLIGHT_DURATION,
        }
    }
}

/// A module as the carousel shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSlide {
    pub module_id: ModuleId,
    pub title: String,
    pub active: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub active_module_id: ModuleId,
    pub active_module_title: String,
    pub active_submodule_index: usize,
    pub current_submodule: Submodule,
    pub next_session: String,
    pub query: String,
    pub mode: SearchMode,
    pub heading: String,
    pub result_count: String,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub stats: StatTriple,
    pub target_stats: StatTriple,
    pub animating: bool,
    pub carousel: Vec<CarouselSlide>,
}

/// Study dashboard state.
pub struct Dashboard {
    catalog: Catalog,
    selection: SelectionState,
    query: String,
    animator: StatAnimator,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("selection", &self.selection)
            .field("query", &self.query)
            .field("animator", &self.animator)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Dashboard on the system clock, starting on the first module.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_clock(catalog, Arc::new(SystemClock), None)
    }

    /// Dashboard on `clock`, starting on `initial` when the catalog has it.
    ///
    /// The counters start at zero and immediately animate toward the
    /// starting module.
    pub fn with_clock(
        catalog: Catalog,
        clock: Arc<dyn Clock>,
        initial: Option<ModuleId>,
    ) -> Self {
        let selection = SelectionState::starting_at(&catalog, initial);
        let mut dashboard = Self {
            catalog,
            selection,
            query: String::new(),
            animator: StatAnimator::default(),
            clock,
        };
        dashboard.restart_animation();
        dashboard
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn active_module_id(&self) -> ModuleId {
        self.selection.active_module_id()
    }

    pub fn active_submodule_index(&self) -> usize {
        self.selection.active_submodule_index()
    }

    pub fn active_module(&self) -> &Module {
        self.selection.active_module(&self.catalog)
    }

    pub fn current_submodule(&self) -> &Submodule {
        self.selection.current_submodule(&self.catalog)
    }

    /// Carousel click: activate `id`, clear the search, rewind to its first lesson.
    pub fn select_module(&mut self, id: ModuleId) -> Result<ModuleFocus, SelectionError> {
        let previous = self.active_module_id();
        self.selection.select_module(&self.catalog, id)?;
        self.query.clear();
        if previous != id {
            self.restart_animation();
        }

        Ok(ModuleFocus {
            module_id: id,
            slide_index: self.catalog.position(id).unwrap_or(0),
        })
    }

    /// Card click: activate lesson `index` of module `id`.
    pub fn select_submodule(
        &mut self,
        id: ModuleId,
        index: usize,
    ) -> Result<FocusRequest, SelectionError> {
        let previous = self.active_module_id();
        self.selection.select_submodule(&self.catalog, id, index)?;
        if previous != id {
            self.restart_animation();
        }
        Ok(FocusRequest::new(id, index))
    }

    /// "Continue where I left off": focus the current lesson again.
    pub fn resume(&self) -> FocusRequest {
        FocusRequest::new(self.active_module_id(), self.active_submodule_index())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_mode(&self) -> SearchMode {
        SearchMode::for_query(&self.query)
    }

    /// The visible submodule list for the current query and selection.
    pub fn filtered_submodules(&self) -> Vec<SearchResult> {
        search::filter(&self.catalog, &self.query, self.active_module_id())
    }

    /// Counters the animation is heading toward.
    pub fn target_stats(&self) -> StatTriple {
        self.active_module().target_stats()
    }

    /// Counters as last displayed.
    pub fn animated_stats(&self) -> StatTriple {
        self.animator.displayed()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Advance the running animation to the clock's current time.
    pub fn tick_stats(&mut self) -> StatTriple {
        if let Some(run) = self.animator.current_run() {
            self.animator.tick(run, self.clock.now());
        }
        self.animator.displayed()
    }

    fn restart_animation(&mut self) -> RunHandle {
        let target = self.target_stats();
        self.animator.start(target, self.clock.now())
    }

    /// "{module}: {lesson}" label for the next study session banner.
    pub fn next_session(&self) -> String {
        format!(
            "{}: {}",
            self.active_module().title,
            self.current_submodule().title
        )
    }

    pub fn section_heading(&self) -> String {
        match self.search_mode() {
            SearchMode::Browsing => self.active_module().title.clone(),
            SearchMode::Searching => SEARCH_HEADING.to_string(),
        }
    }

    pub fn result_count_label(&self) -> String {
        count_label(self.search_mode(), self.filtered_submodules().len())
    }

    /// Message shown in place of an empty result grid.
    pub fn empty_message(&self) -> Option<String> {
        if self.filtered_submodules().is_empty() {
            Some(format!(
                "Nenhum resultado encontrado para \"{}\"",
                self.query
            ))
        } else {
            None
        }
    }

    pub fn carousel(&self) -> Vec<CarouselSlide> {
        let active = self.active_module_id();
        self.catalog
            .list_modules()
            .iter()
            .map(|m| CarouselSlide {
                module_id: m.id,
                title: m.title.clone(),
                active: m.id == active,
            })
            .collect()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let results = self.filtered_submodules();
        let mode = self.search_mode();
        let result_count = count_label(mode, results.len());

        DashboardSnapshot {
            active_module_id: self.active_module_id(),
            active_module_title: self.active_module().title.clone(),
            active_submodule_index: self.active_submodule_index(),
            current_submodule: self.current_submodule().clone(),
            next_session: self.next_session(),
            query: self.query.clone(),
            mode,
            heading: self.section_heading(),
            result_count,
            empty_message: self.empty_message(),
            results,
            stats: self.animated_stats(),
            target_stats: self.target_stats(),
            animating: self.is_animating(),
            carousel: self.carousel(),
        }
    }
}

fn count_label(mode: SearchMode, count: usize) -> String {
    match mode {
        SearchMode::Browsing => format!("{count} Submódulos Disponíveis"),
        SearchMode::Searching => format!("{count} Resultados"),
    }
}
