//! # Record View Engine
//!
//! The engine turns one page of fetched records plus a [`FilterState`] into
//! what a dashboard table shows. It is pure: no I/O, no clock reads, no
//! shared state. Every call sees immutable inputs and returns fresh output.
//!
//! ## Pipeline
//!
//! ```text
//! records ─► tab rule ─► facet conjunction ─► search ─► stable sort ─► page slice
//! ```
//!
//! - **Tab**: only the active tab's rule applies; an unknown tab shows all.
//! - **Facets**: every active facet must match exactly (single-select).
//! - **Search**: case-insensitive substring over the search fields, any field.
//! - **Sort**: type-aware by the field's [`FieldKind`](crate::fields::FieldKind),
//!   absent or unparsable values last, ties in input order.
//!
//! Facet summaries ([`compute_facet_summary`]) rerun the pipeline without the
//! summarized facet; tab counts ([`compute_tab_counts`]) rerun it without the
//! tab stage.
//!
//! ## Failure Model
//!
//! Evaluation never fails. Undeclared sort fields keep the source order and
//! malformed values degrade to "no match". Configuration mistakes are caught
//! when a [`ViewDefinition`](crate::definition::ViewDefinition) is compiled.

use crate::fields::{FacetSpec, FieldSpec, TabSpec};
use crate::model::FieldAccess;
use crate::state::FilterState;
use chrono::NaiveDateTime;
use serde::Serialize;

mod facets;
mod filter;
mod page;
mod sort;
mod tabs;

pub use facets::{compute_facet_summary, FacetBucket, FacetSummary};
pub use page::{PageRequest, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use tabs::{compute_tab_counts, TabCount};

/// Everything the engine knows about one page type.
///
/// Built directly for tests, or compiled from a `ViewDefinition`, which also
/// validates that every reference names a declared field.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    fields: Vec<FieldSpec>,
    facets: Vec<FacetSpec>,
    tabs: Vec<TabSpec>,
    search_fields: Vec<String>,
    reference_time: NaiveDateTime,
}

impl EngineConfig {
    /// `reference_time` is the "now" date-based tab rules compare against.
    pub fn new(reference_time: NaiveDateTime) -> Self {
        Self {
            fields: Vec::new(),
            facets: Vec::new(),
            tabs: Vec::new(),
            search_fields: Vec::new(),
            reference_time,
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_facet(mut self, facet: FacetSpec) -> Self {
        self.facets.push(facet);
        self
    }

    pub fn with_tab(mut self, tab: TabSpec) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn with_search_field(mut self, field: impl Into<String>) -> Self {
        self.search_fields.push(field.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn facet(&self, id: &str) -> Option<&FacetSpec> {
        self.facets.iter().find(|f| f.id == id)
    }

    pub fn tab(&self, id: &str) -> Option<&TabSpec> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn facets(&self) -> &[FacetSpec] {
        &self.facets
    }

    pub fn tabs(&self) -> &[TabSpec] {
        &self.tabs
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
    }
}

/// Filtered and sorted records, in display order.
pub fn compute_view<'a, R: FieldAccess>(
    records: &'a [R],
    state: &FilterState,
    config: &EngineConfig,
) -> Vec<&'a R> {
    let selected = filter::select(records, state, config, filter::Stages::ALL);
    sort::sort_records(selected, state.sort.as_ref(), config)
}

/// Everything a table page renders.
#[derive(Debug, Serialize)]
pub struct ViewResult<'a, R> {
    pub viewed: Vec<&'a R>,
    pub page_slice: Vec<&'a R>,
    pub pagination: Pagination,
    pub facet_summaries: Vec<FacetSummary>,
    pub tab_counts: Vec<TabCount>,
}

impl<R> ViewResult<'_, R> {
    pub fn facet_summary(&self, facet: &str) -> Option<&FacetSummary> {
        self.facet_summaries.iter().find(|s| s.facet == facet)
    }
}

/// Computes the view, its page slice, every facet summary and the tab counts.
pub fn evaluate<'a, R: FieldAccess>(
    records: &'a [R],
    state: &FilterState,
    config: &EngineConfig,
    page: PageRequest,
) -> ViewResult<'a, R> {
    if let Some(tab) = state.active_tab.as_deref() {
        if config.tab(tab).is_none() {
            tracing::warn!(tab, "active tab is not declared, showing all records");
        }
    }

    let viewed = compute_view(records, state, config);
    let pagination = Pagination::new(page, viewed.len());
    let page_slice = pagination.slice(&viewed).to_vec();

    let facet_summaries = config
        .facets()
        .iter()
        .map(|f| compute_facet_summary(records, state, config, &f.id))
        .collect();
    let tab_counts = compute_tab_counts(records, state, config);

    tracing::debug!(
        records = records.len(),
        viewed = viewed.len(),
        page = pagination.page,
        shown = page_slice.len(),
        "computed view"
    );

    ViewResult {
        viewed,
        page_slice,
        pagination,
        facet_summaries,
        tab_counts,
    }
}
