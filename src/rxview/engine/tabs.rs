use super::filter::{select, Stages};
use super::EngineConfig;
use crate::model::FieldAccess;
use crate::state::FilterState;
use serde::Serialize;

/// Badge count for one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabCount {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// Per-tab counts over the records passing the facets and the search.
///
/// The active tab is not applied, so every badge answers "how many would I
/// see if I switched here". Tabs need not be disjoint: the counts can sum to
/// more than the record total.
pub fn compute_tab_counts<R: FieldAccess>(
    records: &[R],
    state: &FilterState,
    config: &EngineConfig,
) -> Vec<TabCount> {
    let base = select(
        records,
        state,
        config,
        Stages {
            apply_tab: false,
            skip_facet: None,
        },
    );
    let now = config.reference_time();

    config
        .tabs()
        .iter()
        .map(|tab| TabCount {
            id: tab.id.clone(),
            label: tab.title().to_string(),
            count: base.iter().filter(|r| tab.rule.matches(**r, now)).count(),
            active: state.active_tab.as_deref() == Some(tab.id.as_str()),
        })
        .collect()
}
