//! Field and facet specifications.
//!
//! A view definition declares the fields it knows about up front. The kind of a
//! field decides how it sorts; facets point at a field and decide how absent
//! values are surfaced.

use super::TabRule;
use serde::{Deserialize, Serialize};

/// How a field's values are interpreted when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Case-sensitive, byte-order string comparison
    #[default]
    Text,

    /// Numeric comparison; numeric strings are accepted
    Number,

    /// Parsed timestamp comparison (ISO dates, RFC 3339, `MM/DD/YYYY`)
    Date,
}

/// Specification for a single record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key of the field in the record (e.g. "appType", "expiry_date")
    pub name: String,

    #[serde(default)]
    pub kind: FieldKind,

    /// Column heading; falls back to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Specification for a single-select facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    /// Facet identifier used in filter state (e.g. "appType")
    pub id: String,

    /// Field the facet reads its value from
    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether records without a value are offered as their own bucket.
    ///
    /// Off by default: absent, empty and "N/A" values are left out of the
    /// summary entirely.
    #[serde(default)]
    pub missing_bucket: bool,
}

impl FacetSpec {
    pub fn new(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            label: None,
            missing_bucket: false,
        }
    }

    /// Facet whose id is also the field name.
    pub fn on(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(field.clone(), field)
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_missing_bucket(mut self) -> Self {
        self.missing_bucket = true;
        self
    }

    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A named tab and the rule deciding which records it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSpec {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub rule: TabRule,
}

impl TabSpec {
    pub fn new(id: impl Into<String>, rule: TabRule) -> Self {
        Self {
            id: id.into(),
            label: None,
            rule,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
