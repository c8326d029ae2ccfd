//! Row-to-entity parsing helpers.
//!
//! `libsql::Row` is column-indexed and loosely typed. These helpers isolate the
//! conversions the session repo needs: timestamps stored as TEXT, JSON array
//! columns, and unsigned counters stored as INTEGER.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Decode a JSON TEXT column into `T`. Empty strings decode as JSON `[]`.
///
/// # Errors
///
/// Returns `StoreError::Query` naming the column if the JSON is invalid.
pub fn parse_json_column<T: DeserializeOwned>(s: &str, column: &str) -> Result<T, StoreError> {
    let s = if s.is_empty() { "[]" } else { s };
    serde_json::from_str(s)
        .map_err(|e| StoreError::Query(format!("Invalid JSON in column '{column}': {e}")))
}

/// Encode a value for a JSON TEXT column.
///
/// # Errors
///
/// Returns `StoreError::Other` if serialization fails.
pub fn to_json_column<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Other(e.into()))
}

/// Narrow an INTEGER column into an unsigned Rust type.
///
/// # Errors
///
/// Returns `StoreError::InvalidState` if the stored value is negative or too large.
pub fn to_unsigned<T: TryFrom<i64>>(value: i64, column: &str) -> Result<T, StoreError> {
    T::try_from(value).map_err(|_| {
        StoreError::InvalidState(format!("column '{column}' holds out-of-range value {value}"))
    })
}
