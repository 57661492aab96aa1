//! # API Facade
//!
//! [`RxviewApi`] is the single entry point a client talks to. It owns the
//! compiled view definition and the current page of records, and forwards
//! every query to the engine.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Holds the working set**: `refresh()` fetches a page from the source and
//!   replaces the previous one; nothing is merged or cached
//! - **Normalizes inputs**: facet ids and tab ids are checked against the
//!   definition before reaching the engine
//! - **Returns structured types**: views, summaries and counts, never strings
//!
//! The [`FilterState`] is not held here. It belongs to the client and
//! survives refreshes untouched.
//!
//! ## Generic Over RecordSource
//!
//! - Production: `RxviewApi<JsonFileSource>`
//! - Testing: `RxviewApi<InMemorySource>`

use crate::definition::ViewDefinition;
use crate::engine::{
    self, EngineConfig, FacetSummary, PageRequest, TabCount, ViewResult,
};
use crate::error::{Result, RxviewError};
use crate::model::Record;
use crate::source::RecordSource;
use crate::state::FilterState;
use chrono::NaiveDateTime;

pub struct RxviewApi<S: RecordSource> {
    source: S,
    definition: ViewDefinition,
    config: EngineConfig,
    records: Vec<Record>,
}

impl<S: RecordSource> RxviewApi<S> {
    /// Compiles the definition; records stay empty until [`refresh`](Self::refresh).
    pub fn new(source: S, definition: ViewDefinition, reference_time: NaiveDateTime) -> Result<Self> {
        let config = definition.compile(reference_time)?;
        Ok(Self {
            source,
            definition,
            config,
            records: Vec::new(),
        })
    }

    /// Replaces the working set with a fresh page from the source.
    pub fn refresh(&mut self) -> Result<usize> {
        self.records = self.source.fetch_page()?;
        tracing::debug!(
            source = %self.source.describe(),
            view = %self.definition.name,
            count = self.records.len(),
            "refreshed records"
        );
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn definition(&self) -> &ViewDefinition {
        &self.definition
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn initial_state(&self) -> FilterState {
        self.definition.initial_state()
    }

    /// Checks tab and facet ids in `state` against the definition.
    pub fn check_state(&self, state: &FilterState) -> Result<()> {
        if let Some(tab) = state.active_tab.as_deref() {
            if self.config.tab(tab).is_none() {
                return Err(RxviewError::Api(format!(
                    "Unknown tab '{}' for view '{}'",
                    tab, self.definition.name
                )));
            }
        }
        if let Some(facet) = state.facets.keys().find(|f| self.config.facet(f).is_none()) {
            return Err(RxviewError::Api(format!(
                "Unknown facet '{}' for view '{}'",
                facet, self.definition.name
            )));
        }
        Ok(())
    }

    pub fn view(&self, state: &FilterState, page: PageRequest) -> Result<ViewResult<'_, Record>> {
        self.check_state(state)?;
        Ok(engine::evaluate(&self.records, state, &self.config, page))
    }

    pub fn facet_summary(&self, state: &FilterState, facet: &str) -> Result<FacetSummary> {
        if self.config.facet(facet).is_none() {
            return Err(RxviewError::Api(format!(
                "Unknown facet '{}' for view '{}'",
                facet, self.definition.name
            )));
        }
        Ok(engine::compute_facet_summary(
            &self.records,
            state,
            &self.config,
            facet,
        ))
    }

    pub fn facet_summaries(&self, state: &FilterState) -> Vec<FacetSummary> {
        self.config
            .facets()
            .iter()
            .map(|f| engine::compute_facet_summary(&self.records, state, &self.config, &f.id))
            .collect()
    }

    pub fn tab_counts(&self, state: &FilterState) -> Vec<TabCount> {
        engine::compute_tab_counts(&self.records, state, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::source::memory::fixtures::{task_records, SourceFixture};
    use crate::source::memory::InMemorySource;
    use crate::state::{FacetChoice, SortSpec};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn api() -> RxviewApi<InMemorySource> {
        let source = SourceFixture::new().with_tasks().source;
        let definition = presets::preset("tasks").unwrap().clone();
        let mut api = RxviewApi::new(source, definition, now()).unwrap();
        api.refresh().unwrap();
        api
    }

    #[test]
    fn new_rejects_invalid_definition() {
        let mut definition = presets::preset("tasks").unwrap().clone();
        definition.search_fields.push("nope".into());
        let result = RxviewApi::new(InMemorySource::default(), definition, now());
        assert!(matches!(result, Err(RxviewError::Config(_))));
    }

    #[test]
    fn view_dispatches_to_engine() {
        let api = api();
        let state = FilterState::new()
            .with_facet("appType", FacetChoice::value("Initial"))
            .with_sort(SortSpec::asc("date"));

        let result = api.view(&state, PageRequest::default()).unwrap();
        let ids: Vec<_> = result.viewed.iter().map(|r| r.display("id")).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(result.facet_summaries.len(), api.engine_config().facets().len());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let api = api();
        let bad_tab = FilterState::new().with_tab("archived");
        assert!(matches!(
            api.view(&bad_tab, PageRequest::default()),
            Err(RxviewError::Api(_))
        ));

        let bad_facet = FilterState::new().with_facet("color", FacetChoice::value("red"));
        assert!(api.check_state(&bad_facet).is_err());
        assert!(api.facet_summary(&FilterState::new(), "color").is_err());
    }

    #[test]
    fn refresh_replaces_records_and_keeps_state() {
        let mut api = api();
        let state = FilterState::new().with_search("alaxan");
        assert_eq!(api.view(&state, PageRequest::default()).unwrap().viewed.len(), 1);

        let mut fewer = task_records();
        fewer.truncate(2);
        api.source.replace(fewer);
        assert_eq!(api.refresh().unwrap(), 2);
        assert_eq!(api.source().fetch_count(), 2);
        assert!(api.view(&state, PageRequest::default()).unwrap().viewed.is_empty());
    }

    #[test]
    fn missing_bucket_counts_unassigned_tasks() {
        let api = api();
        let summary = api.facet_summary(&FilterState::new(), "assignee").unwrap();
        assert_eq!(summary.count_of(&FacetChoice::Missing), 1);
        assert_eq!(summary.total_count, 3);
    }

    #[test]
    fn tab_counts_and_initial_state() {
        let api = api();
        let counts = api.tab_counts(&FilterState::new());
        assert_eq!(counts[0].count, 3);
        assert_eq!(api.initial_state().sort, Some(SortSpec::desc("date")));
    }
}
