use super::EngineConfig;
use crate::fields::SortKey;
use crate::model::{FieldAccess, SortOrder};
use crate::state::SortSpec;
use std::cmp::Ordering;

/// Stable, type-aware sort of the selected records.
///
/// Values that are absent or fail to parse for the field's kind sort last in
/// both directions. An unknown sort field leaves the order untouched.
pub(crate) fn sort_records<'a, R: FieldAccess>(
    records: Vec<&'a R>,
    sort: Option<&SortSpec>,
    config: &EngineConfig,
) -> Vec<&'a R> {
    let Some(sort) = sort else {
        return records;
    };
    let Some(spec) = config.field(&sort.field) else {
        tracing::warn!(field = %sort.field, "sort field is not declared, keeping source order");
        return records;
    };

    let mut keyed: Vec<(Option<SortKey>, &'a R)> = records
        .into_iter()
        .map(|r| (SortKey::extract(r.field(&spec.name), spec.kind), r))
        .collect();

    // sort_by is stable, so equal keys keep their input order
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), sort.order));

    keyed.into_iter().map(|(_, r)| r).collect()
}

fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.compare(b),
            SortOrder::Desc => a.compare(b).reverse(),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
