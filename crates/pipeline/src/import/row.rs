//! Loosely-typed import rows and payload decoding.

use std::sync::Arc;

use arena_core::error::CoreError;
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// One external row, exactly as received.
#[derive(Debug, Clone)]
pub enum RawRow {
    Json(Value),
    Csv {
        headers: Arc<StringRecord>,
        record: StringRecord,
    },
    /// A CSV record that could not be read as a row of the payload. It fails
    /// on decode like any other malformed row.
    Unreadable { raw: Value, error: String },
}

impl RawRow {
    /// Decode into a typed import shape. Any mismatch is a conversion failure.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        match self {
            Self::Json(value) => T::deserialize(value)
                .map_err(|e| CoreError::conversion(format!("invalid row: {e}"))),
            Self::Csv { headers, record } => record
                .deserialize(Some(headers.as_ref()))
                .map_err(|e| CoreError::conversion(format!("invalid row: {e}"))),
            Self::Unreadable { error, .. } => {
                Err(CoreError::conversion(format!("invalid row: {error}")))
            }
        }
    }

    /// The row as a JSON value for the audit log.
    ///
    /// CSV rows become an object keyed by header, values kept as text.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Csv { headers, record } => Value::Object(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Unreadable { raw, .. } => raw.clone(),
        }
    }
}

impl From<Value> for RawRow {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Split a JSON array payload into rows. Elements are not inspected here.
pub fn parse_json_rows(payload: &str) -> Result<Vec<RawRow>, PayloadError> {
    match serde_json::from_str::<Value>(payload)? {
        Value::Array(items) => Ok(items.into_iter().map(RawRow::Json).collect()),
        Value::Object(_) => Err(PayloadError::NotAnArray("an object")),
        Value::String(_) => Err(PayloadError::NotAnArray("a string")),
        Value::Number(_) => Err(PayloadError::NotAnArray("a number")),
        Value::Bool(_) => Err(PayloadError::NotAnArray("a boolean")),
        Value::Null => Err(PayloadError::NotAnArray("null")),
    }
}

/// Split a headed CSV payload into rows.
///
/// Only an unreadable header rejects the payload. A record that can't be read
/// or whose field count differs from the header becomes a
/// [`RawRow::Unreadable`] and fails on its own.
pub fn parse_csv_rows(payload: &str) -> Result<Vec<RawRow>, PayloadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload.as_bytes());

    let headers = Arc::new(reader.headers()?.clone());
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let row = match record {
            Ok(record) if record.len() == headers.len() => RawRow::Csv {
                headers: Arc::clone(&headers),
                record,
            },
            Ok(record) => RawRow::Unreadable {
                raw: record.iter().map(|f| Value::String(f.to_string())).collect(),
                error: format!(
                    "record {line} has {} fields, expected {}",
                    record.len(),
                    headers.len()
                ),
            },
            Err(e) => RawRow::Unreadable {
                raw: Value::Null,
                error: e.to_string(),
            },
        };
        rows.push(row);
    }
    Ok(rows)
}
