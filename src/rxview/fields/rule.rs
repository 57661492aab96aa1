//! Declarative tab membership rules.
//!
//! Each tab of a page is a named predicate over a record. Rules are data, not
//! closures, so a page's tabs can be declared in its view definition.
//! Date rules compare against a reference time captured when the definition
//! is compiled, which keeps evaluation pure.

use super::value::{is_blank, scalar_date};
use crate::model::{FieldAccess, RegistrationStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabRule {
    /// Every record belongs to the tab.
    Always,

    /// Field equals the value (trimmed, case-insensitive).
    Equals { field: String, value: String },

    /// Negation of `Equals`; records without the field match.
    NotEquals { field: String, value: String },

    /// Field parses to the given registration status.
    Status {
        field: String,
        status: RegistrationStatus,
    },

    /// Field is a date strictly before the reference time.
    DateBeforeNow { field: String },

    /// Field is a date at or after the reference time.
    DateOnOrAfterNow { field: String },

    /// Field holds a non-blank value.
    Present { field: String },

    Not { rule: Box<TabRule> },

    All { rules: Vec<TabRule> },

    Any { rules: Vec<TabRule> },
}

impl TabRule {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn status(field: impl Into<String>, status: RegistrationStatus) -> Self {
        Self::Status {
            field: field.into(),
            status,
        }
    }

    pub fn date_before_now(field: impl Into<String>) -> Self {
        Self::DateBeforeNow {
            field: field.into(),
        }
    }

    pub fn date_on_or_after_now(field: impl Into<String>) -> Self {
        Self::DateOnOrAfterNow {
            field: field.into(),
        }
    }

    pub fn present(field: impl Into<String>) -> Self {
        Self::Present {
            field: field.into(),
        }
    }

    pub fn negate(rule: TabRule) -> Self {
        Self::Not {
            rule: Box::new(rule),
        }
    }

    /// Check whether the record belongs to the tab.
    ///
    /// Absent or malformed fields never match a positive rule.
    pub fn matches<R: FieldAccess>(&self, record: &R, now: NaiveDateTime) -> bool {
        match self {
            TabRule::Always => true,
            TabRule::Equals { field, value } => field_equals(record, field, value),
            TabRule::NotEquals { field, value } => !field_equals(record, field, value),
            TabRule::Status { field, status } => record
                .field(field)
                .and_then(|s| RegistrationStatus::parse(&s.to_text()))
                .is_some_and(|parsed| parsed == *status),
            TabRule::DateBeforeNow { field } => record
                .field(field)
                .and_then(scalar_date)
                .is_some_and(|d| d < now),
            TabRule::DateOnOrAfterNow { field } => record
                .field(field)
                .and_then(scalar_date)
                .is_some_and(|d| d >= now),
            TabRule::Present { field } => record
                .field(field)
                .is_some_and(|s| !is_blank(&s.to_text())),
            TabRule::Not { rule } => !rule.matches(record, now),
            TabRule::All { rules } => rules.iter().all(|r| r.matches(record, now)),
            TabRule::Any { rules } => rules.iter().any(|r| r.matches(record, now)),
        }
    }

    /// Every field name the rule reads, for definition validation.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TabRule::Always => {}
            TabRule::Equals { field, .. }
            | TabRule::NotEquals { field, .. }
            | TabRule::Status { field, .. }
            | TabRule::DateBeforeNow { field }
            | TabRule::DateOnOrAfterNow { field }
            | TabRule::Present { field } => out.push(field),
            TabRule::Not { rule } => rule.collect_fields(out),
            TabRule::All { rules } | TabRule::Any { rules } => {
                for rule in rules {
                    rule.collect_fields(out);
                }
            }
        }
    }
}

fn field_equals<R: FieldAccess>(record: &R, field: &str, value: &str) -> bool {
    record
        .field(field)
        .is_some_and(|s| s.to_text().trim().eq_ignore_ascii_case(value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn equals_is_case_insensitive() {
        let rule = TabRule::equals("status", "pending");
        assert!(rule.matches(&Record::new().with("status", " Pending "), now()));
        assert!(!rule.matches(&Record::new().with("status", "Done"), now()));
        assert!(!rule.matches(&Record::new(), now()));
    }

    #[test]
    fn not_equals_matches_absent_fields() {
        let rule = TabRule::not_equals("status", "Done");
        assert!(rule.matches(&Record::new(), now()));
        assert!(!rule.matches(&Record::new().with("status", "done"), now()));
    }

    #[test]
    fn status_rule_uses_canonical_taxonomy() {
        let rule = TabRule::status("status", RegistrationStatus::Canceled);
        assert!(rule.matches(&Record::new().with("status", "Deleted"), now()));
        assert!(rule.matches(&Record::new().with("status", "CANCELED"), now()));
        assert!(!rule.matches(&Record::new().with("status", "Active"), now()));
        assert!(!rule.matches(&Record::new().with("status", "???"), now()));
    }

    #[test]
    fn date_rules_compare_against_reference_time() {
        let before = TabRule::date_before_now("expiry");
        let after = TabRule::date_on_or_after_now("expiry");

        let expired = Record::new().with("expiry", "2024-05-31");
        let today = Record::new().with("expiry", "2024-06-01");
        let garbage = Record::new().with("expiry", "someday");

        assert!(before.matches(&expired, now()));
        assert!(!after.matches(&expired, now()));
        assert!(!before.matches(&today, now()));
        assert!(after.matches(&today, now()));
        assert!(!before.matches(&garbage, now()));
        assert!(!after.matches(&garbage, now()));
    }

    #[test]
    fn combinators() {
        let rule = TabRule::All {
            rules: vec![
                TabRule::date_before_now("expiry"),
                TabRule::negate(TabRule::status("status", RegistrationStatus::Canceled)),
            ],
        };
        let expired_active = Record::new()
            .with("expiry", "2020-01-01")
            .with("status", "Active");
        let expired_canceled = Record::new()
            .with("expiry", "2020-01-01")
            .with("status", "Canceled");
        assert!(rule.matches(&expired_active, now()));
        assert!(!rule.matches(&expired_canceled, now()));

        let any = TabRule::Any {
            rules: vec![TabRule::present("a"), TabRule::present("b")],
        };
        assert!(any.matches(&Record::new().with("b", "x"), now()));
        assert!(!any.matches(&Record::new().with("a", "N/A"), now()));
    }

    #[test]
    fn collects_fields_recursively() {
        let rule = TabRule::Any {
            rules: vec![
                TabRule::equals("a", "1"),
                TabRule::negate(TabRule::date_before_now("b")),
                TabRule::Always,
            ],
        };
        assert_eq!(rule.fields(), vec!["a", "b"]);
    }

    #[test]
    fn deserializes_tagged_rules() {
        let json = r#"{"type": "not", "rule": {"type": "status", "field": "status", "status": "canceled"}}"#;
        let rule: TabRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule,
            TabRule::negate(TabRule::status("status", RegistrationStatus::Canceled))
        );
    }
}
