use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A scalar view of a single record field.
///
/// Records coming from the backend are loosely typed, so every accessor goes
/// through this enum. Nulls, arrays and objects have no scalar view and are
/// reported as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
}

impl Scalar<'_> {
    /// String coercion used by search and facet grouping.
    ///
    /// Integral numbers render without a fractional part, so `3.0` and `3`
    /// both become `"3"`.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(s) => (*s).to_string(),
            Scalar::Number(n) => format_number(*n),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Anything the engine can read named fields from.
///
/// The engine never looks at a record any other way, which keeps it generic
/// over the record shape of each dashboard page.
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<Scalar<'_>>;
}

/// A row as returned by the record source: a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builder-style setter, mostly used by fixtures.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Display text for a field; empty when the field has no scalar value.
    pub fn display(&self, name: &str) -> String {
        self.field(name).map(|s| s.to_text()).unwrap_or_default()
    }
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<Scalar<'_>> {
        match self.fields.get(name)? {
            Value::String(s) => Some(Scalar::Text(s)),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Canonical registration status taxonomy.
///
/// Older pages spell the terminal state "deleted"; it parses as `Canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Active,
    Expired,
    Canceled,
}

impl RegistrationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "canceled" | "cancelled" | "deleted" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Expired => write!(f, "Expired"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_scalars() {
        let rec = Record::new()
            .with("name", "Paracetamol")
            .with("count", 3)
            .with("otc", true)
            .with("notes", Value::Null)
            .with("tags", json!(["a", "b"]));

        assert_eq!(rec.field("name"), Some(Scalar::Text("Paracetamol")));
        assert_eq!(rec.field("count"), Some(Scalar::Number(3.0)));
        assert_eq!(rec.field("otc"), Some(Scalar::Bool(true)));
        assert_eq!(rec.field("notes"), None);
        assert_eq!(rec.field("tags"), None);
        assert_eq!(rec.field("missing"), None);
    }

    #[test]
    fn number_coercion_drops_integral_fraction() {
        assert_eq!(Scalar::Number(3.0).to_text(), "3");
        assert_eq!(Scalar::Number(2.5).to_text(), "2.5");
        assert_eq!(Scalar::Bool(false).to_text(), "false");
    }

    #[test]
    fn record_deserializes_from_plain_object() {
        let rec: Record = serde_json::from_str(r#"{"id": 7, "brand": "Biogesic"}"#).unwrap();
        assert_eq!(rec.display("id"), "7");
        assert_eq!(rec.display("brand"), "Biogesic");
        assert_eq!(rec.display("absent"), "");
    }

    #[test]
    fn status_parses_legacy_deleted_as_canceled() {
        assert_eq!(
            RegistrationStatus::parse("Deleted"),
            Some(RegistrationStatus::Canceled)
        );
        assert_eq!(
            RegistrationStatus::parse(" cancelled "),
            Some(RegistrationStatus::Canceled)
        );
        assert_eq!(
            RegistrationStatus::parse("ACTIVE"),
            Some(RegistrationStatus::Active)
        );
        assert_eq!(RegistrationStatus::parse("pending"), None);
    }

    #[test]
    fn sort_order_flips() {
        assert_eq!(SortOrder::Asc.flip(), SortOrder::Desc);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
