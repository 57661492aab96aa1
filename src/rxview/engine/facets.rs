//! Facet summaries with cross-filtering.
//!
//! The candidate counts shown for a facet are computed over the records that
//! pass the active tab, the search, and every *other* active facet. The
//! facet's own choice is ignored, so picking a value never changes the
//! options offered next to it.

use super::filter::{select, Stages};
use super::EngineConfig;
use crate::fields::value::{facet_value, label_order};
use crate::model::FieldAccess;
use crate::state::{FacetChoice, FilterState};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetBucket {
    pub value: FacetChoice,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSummary {
    pub facet: String,
    pub groups: Vec<FacetBucket>,
    pub total_count: usize,
}

impl FacetSummary {
    pub fn count_of(&self, choice: &FacetChoice) -> usize {
        self.groups
            .iter()
            .find(|b| &b.value == choice)
            .map_or(0, |b| b.count)
    }
}

pub fn compute_facet_summary<R: FieldAccess>(
    records: &[R],
    state: &FilterState,
    config: &EngineConfig,
    facet: &str,
) -> FacetSummary {
    let Some(spec) = config.facet(facet) else {
        tracing::debug!(facet, "summary requested for undeclared facet");
        return FacetSummary {
            facet: facet.to_string(),
            ..Default::default()
        };
    };

    let candidates = select(
        records,
        state,
        config,
        Stages {
            apply_tab: true,
            skip_facet: Some(&spec.id),
        },
    );

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut missing = 0;
    for record in candidates {
        match facet_value(record, &spec.field) {
            Some(value) => *counts.entry(value).or_insert(0) += 1,
            None => missing += 1,
        }
    }

    let mut values: Vec<(String, usize)> = counts.into_iter().collect();
    values.sort_by(|(a, _), (b, _)| label_order(a, b));

    let mut groups: Vec<FacetBucket> = values
        .into_iter()
        .map(|(value, count)| FacetBucket {
            value: FacetChoice::Value(value),
            count,
        })
        .collect();

    if spec.missing_bucket && missing > 0 {
        groups.push(FacetBucket {
            value: FacetChoice::Missing,
            count: missing,
        });
    }

    let total_count = groups.iter().map(|b| b.count).sum();
    FacetSummary {
        facet: spec.id.clone(),
        groups,
        total_count,
    }
}
