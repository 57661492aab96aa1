//! # Filter State
//!
//! [`FilterState`] is the immutable snapshot of everything a user has picked on
//! a page: the active tab, one choice per facet, the search query and the sort
//! column. It is owned by the presentation layer and survives record refreshes;
//! every mutator returns a new snapshot.

use crate::model::SortOrder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// The selected value of a facet.
///
/// `Missing` selects records without a value and is only offered by facets
/// that enable the missing bucket. Serializes as a string or `null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetChoice {
    Value(String),
    Missing,
}

impl FacetChoice {
    pub fn value(v: impl Into<String>) -> Self {
        Self::Value(v.into())
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Active tab; `None` or an unknown id shows every record
    #[serde(default)]
    pub active_tab: Option<String>,

    /// At most one choice per facet; absent keys are inactive facets
    #[serde(default)]
    pub facets: BTreeMap<String, FacetChoice>,

    #[serde(default)]
    pub search_query: String,

    /// Sort column; `None` keeps the source order
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.active_tab = Some(tab.into());
        self
    }

    pub fn without_tab(mut self) -> Self {
        self.active_tab = None;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Activates `choice` on `facet`, replacing any previous choice.
    pub fn with_facet(mut self, facet: impl Into<String>, choice: FacetChoice) -> Self {
        self.facets.insert(facet.into(), choice);
        self
    }

    /// Sidebar click semantics: selecting the active choice clears it,
    /// anything else replaces it.
    pub fn toggle_facet(mut self, facet: impl Into<String>, choice: FacetChoice) -> Self {
        let facet = facet.into();
        if self.facets.get(&facet) == Some(&choice) {
            self.facets.remove(&facet);
        } else {
            self.facets.insert(facet, choice);
        }
        self
    }

    pub fn clear_facet(mut self, facet: &str) -> Self {
        self.facets.remove(facet);
        self
    }

    pub fn clear_facets(mut self) -> Self {
        self.facets.clear();
        self
    }

    /// Column header click semantics: the sorted column flips direction,
    /// a new column starts ascending.
    pub fn toggle_sort(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => {
                Some(SortSpec::new(field, current.order.flip()))
            }
            _ => Some(SortSpec::asc(field)),
        };
        self
    }

    pub fn facet(&self, facet: &str) -> Option<&FacetChoice> {
        self.facets.get(facet)
    }

    /// The lowercased query, or `None` when it is empty. Whitespace is kept
    /// as part of the needle.
    pub fn normalized_query(&self) -> Option<String> {
        if self.search_query.is_empty() {
            None
        } else {
            Some(self.search_query.to_lowercase())
        }
    }
}

/// Trailing-edge debounce for a search box.
///
/// Time is supplied by the caller, so the helper stays deterministic. Feed
/// every keystroke to [`SearchDebounce::input`] and poll
/// [`SearchDebounce::poll`]; a query is released once typing has paused for
/// the configured interval.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn input(&mut self, query: impl Into<String>, at: Instant) {
        self.pending = Some((query.into(), at));
    }

    /// Returns the settled query if the pause has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.interval => {
                self.pending.take().map(|(q, _)| q)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_state() {
        let start = FilterState::new().with_facet("appStatus", FacetChoice::value("Approved"));
        let toggled = start
            .clone()
            .toggle_facet("appType", FacetChoice::value("Initial"))
            .toggle_facet("appType", FacetChoice::value("Initial"));
        assert_eq!(toggled, start);
    }

    #[test]
    fn toggle_other_value_replaces() {
        let state = FilterState::new()
            .toggle_facet("appType", FacetChoice::value("Initial"))
            .toggle_facet("appType", FacetChoice::value("Renewal"));
        assert_eq!(
            state.facet("appType"),
            Some(&FacetChoice::value("Renewal"))
        );
        assert_eq!(state.facets.len(), 1);
    }

    #[test]
    fn toggle_sort_flips_same_column_and_resets_new_column() {
        let state = FilterState::new().toggle_sort("date");
        assert_eq!(state.sort, Some(SortSpec::asc("date")));

        let state = state.toggle_sort("date");
        assert_eq!(state.sort, Some(SortSpec::desc("date")));

        let state = state.toggle_sort("brand");
        assert_eq!(state.sort, Some(SortSpec::asc("brand")));
    }

    #[test]
    fn normalized_query_lowercases_and_keeps_whitespace() {
        assert_eq!(FilterState::new().normalized_query(), None);
        assert_eq!(FilterState::new().with_search("").normalized_query(), None);
        assert_eq!(
            FilterState::new().with_search("   ").normalized_query(),
            Some("   ".into())
        );
        assert_eq!(
            FilterState::new().with_search(" ABC ").normalized_query(),
            Some(" abc ".into())
        );
    }

    #[test]
    fn facet_choice_serializes_missing_as_null() {
        let json = serde_json::to_string(&vec![
            FacetChoice::value("Initial"),
            FacetChoice::Missing,
        ])
        .unwrap();
        assert_eq!(json, r#"["Initial",null]"#);
    }

    #[test]
    fn clearing_facets() {
        let state = FilterState::new()
            .with_facet("a", FacetChoice::value("1"))
            .with_facet("b", FacetChoice::Missing);
        assert_eq!(state.clone().clear_facet("a").facets.len(), 1);
        assert!(state.clear_facets().facets.is_empty());
    }

    #[test]
    fn debounce_releases_after_pause() {
        let t0 = Instant::now();
        let mut debounce = SearchDebounce::new(Duration::from_millis(150));

        debounce.input("a", t0);
        debounce.input("ab", t0 + Duration::from_millis(50));
        assert_eq!(debounce.poll(t0 + Duration::from_millis(100)), None);
        assert!(debounce.is_pending());

        assert_eq!(
            debounce.poll(t0 + Duration::from_millis(200)),
            Some("ab".to_string())
        );
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(t0 + Duration::from_millis(500)), None);
    }
}
