//! Value coercion: facet values, search text and sort keys.

use super::FieldKind;
use crate::model::{FieldAccess, Scalar};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// True for values the dashboards treat as "no value".
pub fn is_blank(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.eq_ignore_ascii_case("n/a")
}

/// The facet value of `field`, or `None` when it is absent or blank.
pub fn facet_value<R: FieldAccess>(record: &R, field: &str) -> Option<String> {
    let text = record.field(field)?.to_text();
    if is_blank(&text) {
        None
    } else {
        Some(text)
    }
}

/// Lowercased search text of `field`; absent fields search as empty.
pub fn search_text<R: FieldAccess>(record: &R, field: &str) -> String {
    record
        .field(field)
        .map(|s| s.to_text().to_lowercase())
        .unwrap_or_default()
}

/// Parses the date-like strings seen in backend payloads.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Date view of a scalar. Numbers are epoch milliseconds.
pub fn scalar_date(scalar: Scalar<'_>) -> Option<NaiveDateTime> {
    match scalar {
        Scalar::Text(s) => parse_date(s),
        Scalar::Number(n) if n.is_finite() => {
            DateTime::from_timestamp_millis(n as i64).map(|d| d.naive_utc())
        }
        _ => None,
    }
}

/// A typed, totally ordered sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl SortKey {
    /// Builds the key for a field of the given kind.
    ///
    /// Returns `None` for absent or unparsable values; those sort last.
    pub fn extract(scalar: Option<Scalar<'_>>, kind: FieldKind) -> Option<Self> {
        let scalar = scalar?;
        match kind {
            FieldKind::Number => {
                let n = match scalar {
                    Scalar::Number(n) => Some(n),
                    Scalar::Text(s) => s.trim().parse::<f64>().ok(),
                    Scalar::Bool(_) => None,
                };
                n.filter(|n| !n.is_nan()).map(SortKey::Number)
            }
            FieldKind::Date => scalar_date(scalar).map(SortKey::Date),
            FieldKind::Text => Some(SortKey::Text(scalar.to_text())),
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Keys of one field always share a kind
            _ => Ordering::Equal,
        }
    }
}

/// Ordering used for facet labels, close to a locale collation: base letters
/// first, then accents, then case (lowercase before uppercase), then bytes.
pub fn label_order(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| {
            let accented = |s: &str| s.nfd().flat_map(char::to_lowercase).collect::<String>();
            accented(a).cmp(&accented(b))
        })
        .then_with(|| case_marks(a).cmp(case_marks(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}
