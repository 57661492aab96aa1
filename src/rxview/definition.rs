//! # View Definitions
//!
//! A [`ViewDefinition`] is the declarative, serializable description of one
//! dashboard page: which fields exist, which of them are facets, how the tabs
//! select records, and which fields free-text search looks at.
//!
//! Definitions are plain JSON so a page can be described without code:
//!
//! ```json
//! {
//!   "name": "otc",
//!   "fields": [{"name": "brand_name"}, {"name": "expiry_date", "kind": "date"}],
//!   "facets": [{"id": "category", "field": "category"}],
//!   "tabs": [{"id": "all", "rule": {"type": "always"}}],
//!   "search_fields": ["brand_name"],
//!   "default_sort": {"field": "expiry_date", "order": "desc"}
//! }
//! ```
//!
//! [`ViewDefinition::compile`] turns a definition into an
//! [`EngineConfig`](crate::engine::EngineConfig). That is the one place a
//! misconfigured page is rejected; evaluation itself never fails.

use crate::engine::EngineConfig;
use crate::error::{Result, RxviewError};
use crate::fields::{FacetSpec, FieldSpec, TabSpec};
use crate::state::{FilterState, SortSpec};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    #[serde(default)]
    pub facets: Vec<FacetSpec>,

    #[serde(default)]
    pub tabs: Vec<TabSpec>,

    #[serde(default)]
    pub search_fields: Vec<String>,

    /// Tab selected when a page is first opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tab: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,
}

impl ViewDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            facets: Vec::new(),
            tabs: Vec::new(),
            search_fields: Vec::new(),
            default_tab: None,
            default_sort: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let def: ViewDefinition = serde_json::from_str(json)?;
        Ok(def)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Checks that every facet, tab rule, search field and default sort names
    /// a declared field, and that ids are unique.
    pub fn validate(&self) -> Result<()> {
        let mut declared = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid(&self.name, "field with an empty name"));
            }
            if !declared.insert(field.name.as_str()) {
                return Err(invalid(
                    &self.name,
                    format!("field '{}' declared twice", field.name),
                ));
            }
        }
        let known = |field: &str| declared.contains(field);

        let mut facet_ids = HashSet::new();
        for facet in &self.facets {
            if !facet_ids.insert(facet.id.as_str()) {
                return Err(invalid(
                    &self.name,
                    format!("facet '{}' declared twice", facet.id),
                ));
            }
            if !known(facet.field.as_str()) {
                return Err(invalid(
                    &self.name,
                    format!("facet '{}' reads undeclared field '{}'", facet.id, facet.field),
                ));
            }
        }

        let mut tab_ids = HashSet::new();
        for tab in &self.tabs {
            if !tab_ids.insert(tab.id.as_str()) {
                return Err(invalid(&self.name, format!("tab '{}' declared twice", tab.id)));
            }
            if let Some(field) = tab.rule.fields().into_iter().find(|f| !known(*f)) {
                return Err(invalid(
                    &self.name,
                    format!("tab '{}' reads undeclared field '{}'", tab.id, field),
                ));
            }
        }

        if let Some(field) = self.search_fields.iter().find(|f| !known(f.as_str())) {
            return Err(invalid(
                &self.name,
                format!("search field '{}' is not declared", field),
            ));
        }

        if let Some(tab) = &self.default_tab {
            if !tab_ids.contains(tab.as_str()) {
                return Err(invalid(
                    &self.name,
                    format!("default tab '{}' is not declared", tab),
                ));
            }
        }

        if let Some(sort) = &self.default_sort {
            if !known(sort.field.as_str()) {
                return Err(invalid(
                    &self.name,
                    format!("default sort field '{}' is not declared", sort.field),
                ));
            }
        }

        Ok(())
    }

    /// Validates the definition and builds the engine configuration.
    ///
    /// `reference_time` is the "now" date-based tab rules compare against.
    pub fn compile(&self, reference_time: NaiveDateTime) -> Result<EngineConfig> {
        self.validate()?;

        let config = self
            .fields
            .iter()
            .cloned()
            .fold(EngineConfig::new(reference_time), EngineConfig::with_field);
        let config = self
            .facets
            .iter()
            .cloned()
            .fold(config, EngineConfig::with_facet);
        let config = self.tabs.iter().cloned().fold(config, EngineConfig::with_tab);
        let config = self
            .search_fields
            .iter()
            .cloned()
            .fold(config, EngineConfig::with_search_field);

        tracing::debug!(
            view = %self.name,
            fields = self.fields.len(),
            facets = self.facets.len(),
            tabs = self.tabs.len(),
            "compiled view definition"
        );
        Ok(config)
    }

    /// The state a page opens with: default tab and default sort, nothing else.
    pub fn initial_state(&self) -> FilterState {
        FilterState {
            active_tab: self.default_tab.clone(),
            sort: self.default_sort.clone(),
            ..FilterState::default()
        }
    }
}

fn invalid(view: &str, msg: impl std::fmt::Display) -> RxviewError {
    RxviewError::Config(format!("{}: {}", view, msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TabRule;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> ViewDefinition {
        ViewDefinition {
            fields: vec![
                FieldSpec::text("brand"),
                FieldSpec::text("appType"),
                FieldSpec::date("date"),
            ],
            facets: vec![FacetSpec::on("appType")],
            tabs: vec![
                TabSpec::new("all", TabRule::Always),
                TabSpec::new("initial", TabRule::equals("appType", "Initial")),
            ],
            search_fields: vec!["brand".into()],
            default_tab: Some("all".into()),
            default_sort: Some(SortSpec::desc("date")),
            ..ViewDefinition::new("sample")
        }
    }

    fn config_error(def: &ViewDefinition) -> String {
        match def.validate() {
            Err(RxviewError::Config(msg)) => msg,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn valid_definition_compiles() {
        let config = sample().compile(now()).unwrap();
        assert_eq!(config.fields().len(), 3);
        assert!(config.facet("appType").is_some());
        assert!(config.tab("initial").is_some());
        assert_eq!(config.search_fields(), &["brand".to_string()]);
        assert_eq!(config.reference_time(), now());
    }

    #[test]
    fn rejects_facet_on_undeclared_field() {
        let mut def = sample();
        def.facets.push(FacetSpec::on("category"));
        assert!(config_error(&def).contains("undeclared field 'category'"));
    }

    #[test]
    fn rejects_tab_rule_on_undeclared_field() {
        let mut def = sample();
        def.tabs.push(TabSpec::new(
            "expired",
            TabRule::negate(TabRule::date_before_now("expiry")),
        ));
        assert!(config_error(&def).contains("tab 'expired'"));
    }

    #[test]
    fn rejects_unknown_search_and_sort_fields() {
        let mut def = sample();
        def.search_fields.push("generic".into());
        assert!(config_error(&def).contains("search field 'generic'"));

        let mut def = sample();
        def.default_sort = Some(SortSpec::asc("nope"));
        assert!(config_error(&def).contains("default sort"));
    }

    #[test]
    fn rejects_duplicates_and_unknown_default_tab() {
        let mut def = sample();
        def.fields.push(FieldSpec::number("brand"));
        assert!(config_error(&def).contains("declared twice"));

        let mut def = sample();
        def.default_tab = Some("archived".into());
        assert!(config_error(&def).contains("default tab"));
    }

    #[test]
    fn parses_json_definition() {
        let json = r#"{
            "name": "tasks",
            "fields": [{"name": "status"}, {"name": "logdate", "kind": "date"}],
            "facets": [{"id": "status", "field": "status", "missing_bucket": true}],
            "tabs": [{"id": "open", "label": "Open", "rule": {"type": "not_equals", "field": "status", "value": "Done"}}],
            "search_fields": ["status"],
            "default_sort": {"field": "logdate", "order": "desc"}
        }"#;
        let def = ViewDefinition::from_json(json).unwrap();
        assert!(def.facets[0].missing_bucket);
        assert_eq!(def.tabs[0].title(), "Open");
        assert!(def.validate().is_ok());

        let state = def.initial_state();
        assert_eq!(state.sort, Some(SortSpec::desc("logdate")));
        assert_eq!(state.active_tab, None);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = ViewDefinition::from_json("{ nope").unwrap_err();
        assert!(matches!(err, RxviewError::Serialization(_)));
    }
}
