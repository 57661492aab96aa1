//! Built-in view definitions for the regulatory dashboards.
//!
//! | Preset | Page | Tabs |
//! |--------|------|------|
//! | `otc` | OTC product registrations | all, active, expired |
//! | `fda` | FDA verification portal | all (not canceled), expired, canceled |
//! | `tasks` | workflow tasks | all, then one per task status |
//!
//! The FDA tabs deliberately overlap: an expired registration that was never
//! canceled shows up under both "all" and "expired".

use crate::definition::ViewDefinition;
use crate::fields::{FacetSpec, FieldSpec, TabRule, TabSpec};
use crate::model::RegistrationStatus;
use crate::state::SortSpec;
use once_cell::sync::Lazy;

pub static PRESETS: Lazy<Vec<ViewDefinition>> = Lazy::new(|| vec![otc(), fda(), tasks()]);

pub fn preset(name: &str) -> Option<&'static ViewDefinition> {
    PRESETS.iter().find(|d| d.name.eq_ignore_ascii_case(name.trim()))
}

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|d| d.name.as_str()).collect()
}

fn not_canceled() -> TabRule {
    TabRule::negate(TabRule::status("status", RegistrationStatus::Canceled))
}

fn otc() -> ViewDefinition {
    ViewDefinition {
        fields: vec![
            FieldSpec::text("reg_no").labeled("Reg. No."),
            FieldSpec::text("brand_name").labeled("Brand"),
            FieldSpec::text("generic_name").labeled("Generic"),
            FieldSpec::text("dosage_strength").labeled("Strength"),
            FieldSpec::text("category").labeled("Category"),
            FieldSpec::text("company").labeled("Company"),
            FieldSpec::text("status").labeled("Status"),
            FieldSpec::date("expiry_date").labeled("Expiry"),
        ],
        facets: vec![
            FacetSpec::on("category").labeled("Category"),
            FacetSpec::on("company").labeled("Company"),
            FacetSpec::on("status").labeled("Status"),
        ],
        tabs: vec![
            TabSpec::new("all", TabRule::Always).labeled("All"),
            TabSpec::new(
                "active",
                TabRule::status("status", RegistrationStatus::Active),
            )
            .labeled("Active"),
            TabSpec::new("expired", TabRule::date_before_now("expiry_date")).labeled("Expired"),
        ],
        search_fields: vec![
            "reg_no".into(),
            "brand_name".into(),
            "generic_name".into(),
            "company".into(),
        ],
        default_tab: Some("all".into()),
        default_sort: Some(SortSpec::asc("brand_name")),
        ..ViewDefinition::new("otc")
    }
}

fn fda() -> ViewDefinition {
    ViewDefinition {
        fields: vec![
            FieldSpec::text("registration_number").labeled("Reg. No."),
            FieldSpec::text("brand_name").labeled("Brand"),
            FieldSpec::text("generic_name").labeled("Generic"),
            FieldSpec::text("manufacturer").labeled("Manufacturer"),
            FieldSpec::text("classification").labeled("Classification"),
            FieldSpec::text("status").labeled("Status"),
            FieldSpec::date("issuance_date").labeled("Issued"),
            FieldSpec::date("expiry_date").labeled("Expiry"),
        ],
        facets: vec![
            FacetSpec::on("classification").labeled("Classification"),
            FacetSpec::on("manufacturer")
                .labeled("Manufacturer")
                .with_missing_bucket(),
        ],
        tabs: vec![
            TabSpec::new("all", not_canceled()).labeled("All"),
            TabSpec::new(
                "expired",
                TabRule::All {
                    rules: vec![TabRule::date_before_now("expiry_date"), not_canceled()],
                },
            )
            .labeled("Expired"),
            TabSpec::new(
                "canceled",
                TabRule::status("status", RegistrationStatus::Canceled),
            )
            .labeled("Canceled"),
        ],
        search_fields: vec![
            "registration_number".into(),
            "brand_name".into(),
            "generic_name".into(),
            "manufacturer".into(),
        ],
        default_tab: Some("all".into()),
        default_sort: Some(SortSpec::desc("issuance_date")),
        ..ViewDefinition::new("fda")
    }
}

fn tasks() -> ViewDefinition {
    let status_tab = |id: &str, label: &str| {
        TabSpec::new(id, TabRule::equals("appStatus", label)).labeled(label)
    };

    ViewDefinition {
        fields: vec![
            FieldSpec::number("id").labeled("ID"),
            FieldSpec::text("brand").labeled("Brand"),
            FieldSpec::text("generic").labeled("Generic"),
            FieldSpec::text("appType").labeled("Application"),
            FieldSpec::text("appStatus").labeled("Status"),
            FieldSpec::text("step").labeled("Step"),
            FieldSpec::text("assignee").labeled("Assignee"),
            FieldSpec::date("date").labeled("Logged"),
        ],
        facets: vec![
            FacetSpec::on("appType").labeled("Application"),
            FacetSpec::on("appStatus").labeled("Status"),
            FacetSpec::on("step").labeled("Step"),
            FacetSpec::on("assignee")
                .labeled("Assignee")
                .with_missing_bucket(),
        ],
        tabs: vec![
            TabSpec::new("all", TabRule::Always).labeled("All"),
            status_tab("pending", "Pending"),
            status_tab("in_progress", "In Progress"),
            status_tab("approved", "Approved"),
            status_tab("rejected", "Rejected"),
        ],
        search_fields: vec!["brand".into(), "generic".into(), "assignee".into()],
        default_tab: None,
        default_sort: Some(SortSpec::desc("date")),
        ..ViewDefinition::new("tasks")
    }
}
