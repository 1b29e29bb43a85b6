//! Structural validation of wire records.
//!
//! A wire record is the loosely-typed JSON object exchanged with the API.
//! These helpers check that required keys exist before a record is turned
//! into a typed resource, and extract typed values from it.

use serde_json::Value;

use crate::error::{AsanaError, Result};

/// JSON object as received from (or sent to) the service.
pub type WireRecord = serde_json::Map<String, Value>;

/// Fail with [`AsanaError::InvalidData`] unless `key` is present.
pub fn assert_key_present(record: &WireRecord, key: &str) -> Result<()> {
    if record.contains_key(key) {
        Ok(())
    } else {
        Err(AsanaError::invalid_data(record))
    }
}

/// Check each key in order, failing on the first one missing.
pub fn assert_keys_present(record: &WireRecord, keys: &[&str]) -> Result<()> {
    keys.iter().try_for_each(|key| assert_key_present(record, key))
}

/// Required string value.
pub(crate) fn string_field(record: &WireRecord, key: &str) -> Result<String> {
    match record.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(AsanaError::invalid_data(record)),
    }
}

/// Optional string value; absent and `null` both yield `None`.
pub(crate) fn optional_string_field(record: &WireRecord, key: &str) -> Result<Option<String>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(AsanaError::invalid_data(record)),
    }
}

/// Optional bool value with a fallback for absent or `null`.
pub(crate) fn bool_field_or(record: &WireRecord, key: &str, default: bool) -> Result<bool> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(AsanaError::invalid_data(record)),
    }
}

/// Interpret a decoded value as a wire record.
pub(crate) fn as_record(value: &Value) -> Result<&WireRecord> {
    value.as_object().ok_or_else(|| AsanaError::InvalidData {
        record: value.clone(),
    })
}
