//! Query engine composition root
//!
//! The derived page is a pure function of (collection, query state, schema),
//! recomputed in full whenever any input changes. [`apply_query`] is that
//! function; [`QueryEngine`] owns the state and the last-fetched collection
//! and keeps the derived view current so the presentation layer only ever
//! reads.

use crate::core::record::Record;
use crate::core::schema::Schema;
use crate::query::clause::Clause;
use crate::query::filter::{AdvancedFilters, record_matches};
use crate::query::paginate::{Page, PageMeta, PageState, page_window, paginate};
use crate::query::sort::{SortState, sort_records};
use crate::store::RecordStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The complete, serializable filter/sort/pagination state of one table
///
/// Owned by the presentation layer, mutated by user interaction, and passed
/// whole into [`apply_query`]. Serializable so a screen can stash and
/// restore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryState {
    /// Free-text search term
    #[serde(default)]
    pub search: String,

    /// Category-partitioned advanced filters
    #[serde(default)]
    pub advanced: AdvancedFilters,

    /// Ordered query-editor clause list
    #[serde(default)]
    pub clauses: Vec<Clause>,

    /// Column sort
    #[serde(default)]
    pub sort: SortState,

    /// Pagination
    #[serde(default)]
    pub page: PageState,
}

impl QueryState {
    /// Drop every filter (search, advanced, clauses), keeping sort and page
    /// size; the current page resets to 1
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.advanced.clear();
        self.clauses.clear();
        self.page.current_page = 1;
    }
}

/// Compute the derived page: filter, sort, clamp, slice
///
/// Pure and total: malformed filter values degrade inside the predicate
/// evaluators, so this never fails on bad input.
pub fn apply_query(records: &[Record], state: &QueryState, schema: &Schema) -> Page<Record> {
    let search_fields = schema.search_fields();
    let mut rows: Vec<Record> = records
        .iter()
        .filter(|r| {
            record_matches(
                r,
                &state.search,
                &search_fields,
                &state.advanced,
                &state.clauses,
                schema,
            )
        })
        .cloned()
        .collect();

    sort_records(&mut rows, &state.sort, schema);
    paginate(&rows, &state.page)
}

/// Owns the collection, the query state and the derived view of one table
///
/// Every mutator recomputes the view; reads are free. Mutations of the
/// backing store happen out-of-band; callers re-fetch and hand the fresh
/// collection to [`QueryEngine::replace_records`] (or use
/// [`QueryEngine::refresh`]).
#[derive(Debug, Clone)]
pub struct QueryEngine {
    schema: Schema,
    records: Vec<Record>,
    state: QueryState,
    view: Page<Record>,
}

impl QueryEngine {
    /// Create an engine with an empty collection
    pub fn new(schema: Schema) -> Self {
        let state = QueryState::default();
        let view = Page::empty(state.page.per_page());
        Self {
            schema,
            records: Vec::new(),
            state,
            view,
        }
    }

    /// Create an engine over an initial collection
    pub fn with_records(schema: Schema, records: Vec<Record>) -> Self {
        let mut engine = Self::new(schema);
        engine.replace_records(records);
        engine
    }

    // === Reads ===

    /// Rows of the current derived page
    pub fn rows(&self) -> &[Record] {
        &self.view.rows
    }

    /// Pagination metadata of the current derived page
    pub fn meta(&self) -> &PageMeta {
        &self.view.meta
    }

    /// The active query state, for controlled-input binding
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// The screen's schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Total items after filtering
    pub fn total_items(&self) -> usize {
        self.view.meta.total_items
    }

    /// The full filtered collection, ignoring pagination; this is what CSV
    /// export consumes
    pub fn filtered_records(&self) -> Vec<Record> {
        let search_fields = self.schema.search_fields();
        self.records
            .iter()
            .filter(|r| {
                record_matches(
                    r,
                    &self.state.search,
                    &search_fields,
                    &self.state.advanced,
                    &self.state.clauses,
                    &self.schema,
                )
            })
            .cloned()
            .collect()
    }

    /// Footer page-number buttons for the current view
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.view.meta.page, self.view.meta.total_pages)
    }

    // === Collection ===

    /// Replace the collection wholesale (after a fetch) and recompute
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.recompute();
    }

    /// Fetch the collection from a store and swap it in
    ///
    /// On failure the last successfully fetched collection stays visible
    /// and the error is returned for the caller's notification layer.
    pub async fn refresh(&mut self, store: &dyn RecordStore) -> Result<()> {
        match store.fetch().await {
            Ok(records) => {
                self.replace_records(records);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Fetch failed, keeping previous collection");
                Err(err)
            }
        }
    }

    // === State mutators ===

    /// Set the free-text search term; resets to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search = term.into();
        self.state.page.current_page = 1;
        self.recompute();
    }

    /// Edit the advanced filter set; resets to the first page
    pub fn edit_advanced(&mut self, edit: impl FnOnce(&mut AdvancedFilters)) {
        edit(&mut self.state.advanced);
        self.state.page.current_page = 1;
        self.recompute();
    }

    /// Append a clause and return its stable id
    pub fn add_clause(&mut self, clause: Clause) -> Uuid {
        let id = clause.id;
        self.state.clauses.push(clause);
        self.state.page.current_page = 1;
        self.recompute();
        id
    }

    /// Update the clause with the given id in place
    ///
    /// Returns false when no clause has that id.
    pub fn update_clause(&mut self, id: Uuid, edit: impl FnOnce(&mut Clause)) -> bool {
        let Some(clause) = self.state.clauses.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        edit(clause);
        self.state.page.current_page = 1;
        self.recompute();
        true
    }

    /// Remove the clause with the given id
    ///
    /// Returns false when no clause has that id.
    pub fn remove_clause(&mut self, id: Uuid) -> bool {
        let before = self.state.clauses.len();
        self.state.clauses.retain(|c| c.id != id);
        if self.state.clauses.len() == before {
            return false;
        }
        self.state.page.current_page = 1;
        self.recompute();
        true
    }

    /// Set the sort outright
    pub fn set_sort(&mut self, sort: SortState) {
        self.state.sort = sort;
        self.recompute();
    }

    /// Column-header click: toggle direction on the same field, restart
    /// ascending on a new one
    pub fn toggle_sort(&mut self, field: &str) {
        self.state.sort.toggle(field);
        self.recompute();
    }

    /// Jump to a page; out-of-range values clamp into `[1, total_pages]`
    pub fn set_page(&mut self, page: usize) {
        self.state.page.current_page = page;
        self.recompute();
    }

    /// Change the page size; always resets to the first page
    pub fn set_items_per_page(&mut self, per_page: usize) {
        self.state.page.set_items_per_page(per_page);
        self.recompute();
    }

    /// Drop every filter, keeping sort and page size
    pub fn clear_filters(&mut self) {
        self.state.clear_filters();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.view = apply_query(&self.records, &self.state, &self.schema);
        // Keep the owned state in step with what the view actually shows,
        // so controlled inputs reflect the clamped page.
        self.state.page.clamp(self.view.meta.total_pages);
        tracing::debug!(
            total = self.records.len(),
            filtered = self.view.meta.total_items,
            page = self.view.meta.page,
            "Recomputed derived view"
        );
    }
}
