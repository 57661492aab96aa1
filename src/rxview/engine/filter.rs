//! Record predicates: tab membership, facet conjunction and free-text search.
//!
//! The three predicates are applied in that order. Facet summaries and tab
//! counts reuse the same pipeline with one stage relaxed, which is what keeps
//! their counts consistent with the final result set.

use super::EngineConfig;
use crate::fields::value::{facet_value, search_text};
use crate::model::FieldAccess;
use crate::state::{FacetChoice, FilterState};

/// Which stages of the pipeline to apply.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stages<'s> {
    pub apply_tab: bool,
    /// Facet whose own choice is ignored (cross-filtering)
    pub skip_facet: Option<&'s str>,
}

impl Stages<'_> {
    pub const ALL: Stages<'static> = Stages {
        apply_tab: true,
        skip_facet: None,
    };
}

pub(crate) fn tab_matches<R: FieldAccess>(
    record: &R,
    state: &FilterState,
    config: &EngineConfig,
) -> bool {
    match state.active_tab.as_deref().and_then(|id| config.tab(id)) {
        Some(tab) => tab.rule.matches(record, config.reference_time()),
        None => true,
    }
}

pub(crate) fn facets_match<R: FieldAccess>(
    record: &R,
    state: &FilterState,
    config: &EngineConfig,
    skip_facet: Option<&str>,
) -> bool {
    config
        .facets()
        .iter()
        .filter(|f| Some(f.id.as_str()) != skip_facet)
        .all(|f| match state.facet(&f.id) {
            None => true,
            Some(choice) => choice_matches(record, &f.field, choice),
        })
}

fn choice_matches<R: FieldAccess>(record: &R, field: &str, choice: &FacetChoice) -> bool {
    let actual = facet_value(record, field);
    match choice {
        FacetChoice::Value(v) => actual.as_deref() == Some(v.as_str()),
        FacetChoice::Missing => actual.is_none(),
    }
}

/// `query` must already be normalized (trimmed, lowercased).
pub(crate) fn search_matches<R: FieldAccess>(
    record: &R,
    query: Option<&str>,
    config: &EngineConfig,
) -> bool {
    let Some(query) = query else {
        return true;
    };
    config
        .search_fields()
        .iter()
        .any(|f| search_text(record, f).contains(query))
}

/// Runs the selected stages over `records`, preserving input order.
pub(crate) fn select<'a, R: FieldAccess>(
    records: &'a [R],
    state: &FilterState,
    config: &EngineConfig,
    stages: Stages<'_>,
) -> Vec<&'a R> {
    let query = state.normalized_query();
    records
        .iter()
        .filter(|r| !stages.apply_tab || tab_matches(*r, state, config))
        .filter(|r| facets_match(*r, state, config, stages.skip_facet))
        .filter(|r| search_matches(*r, query.as_deref(), config))
        .collect()
}
