//! # Record Source
//!
//! A [`RecordSource`] yields one page of records. The engine treats that page
//! as its whole working set: nothing is cached across fetches, and a refresh
//! simply replaces the previous page.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileSource`]: reads a JSON export from disk
//! - [`memory::InMemorySource`]: fixed records, for tests and embedding
//!
//! ## Payload Format
//!
//! Backends are not consistent about wrapping, so both shapes are accepted:
//!
//! ```text
//! [ {...}, {...} ]                    # bare array
//! { "data": [ {...}, {...} ], ... }   # envelope: data | records | items | results
//! ```
//!
//! Array entries that are not objects are skipped.

use crate::error::{Result, RxviewError};
use crate::model::Record;
use serde_json::Value;

pub mod fs;
pub mod memory;

/// Envelope keys searched, in order, for the record array.
pub const ENVELOPE_KEYS: &[&str] = &["data", "records", "items", "results"];

pub trait RecordSource {
    /// Human-readable origin of the records (path, fixture name)
    fn describe(&self) -> String;

    /// Fetch the current page of records
    fn fetch_page(&mut self) -> Result<Vec<Record>>;
}

/// Parses a record payload in either accepted shape.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut envelope) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match envelope.remove(*key) {
                Some(Value::Array(rows)) => Some(rows),
                _ => None,
            })
            .ok_or_else(|| {
                RxviewError::Source(format!(
                    "expected a record array under one of: {}",
                    ENVELOPE_KEYS.join(", ")
                ))
            })?,
        _ => {
            return Err(RxviewError::Source(
                "expected a JSON array or object".to_string(),
            ))
        }
    };

    let total = rows.len();
    let records: Vec<Record> = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(Record::from_map(map)),
            _ => None,
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            skipped = total - records.len(),
            "skipped array entries that are not objects"
        );
    }
    Ok(records)
}
