//! # Value Coercion
//!
//! The parameter store only holds strings. Values are written in a textual form
//! that keeps their original type recognizable on read-back:
//!
//! - objects and arrays are JSON-serialized
//! - numbers are wrapped as `NUMBER(n)`
//! - booleans become `__TRUE__` / `__FALSE__`
//! - strings pass through unchanged

use crate::constants::{FALSE_SENTINEL, NUMBER_PREFIX, NUMBER_SUFFIX, TRUE_SENTINEL};
use serde_json::Value;

/// Encode a value into the string representation the store requires
#[must_use]
pub fn to_stored_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format!("{NUMBER_PREFIX}{n}{NUMBER_SUFFIX}"),
        Value::Bool(true) => TRUE_SENTINEL.to_string(),
        Value::Bool(false) => FALSE_SENTINEL.to_string(),
        Value::Object(_) | Value::Array(_) | Value::Null => value.to_string(),
    }
}

/// Decode a stored string back into a typed value
///
/// This is ambiguous by construction: a string that was *written* as the literal
/// text `__TRUE__`, `NUMBER(3)` or `{"a":1}` is indistinguishable from the encoded
/// boolean, number or object and will come back typed. Callers that store arbitrary
/// user text and need it back verbatim should read the raw value instead.
#[must_use]
pub fn from_stored_string(stored: &str) -> Value {
    if stored == TRUE_SENTINEL {
        return Value::Bool(true);
    }
    if stored == FALSE_SENTINEL {
        return Value::Bool(false);
    }
    if let Some(number) = stored
        .strip_prefix(NUMBER_PREFIX)
        .and_then(|rest| rest.strip_suffix(NUMBER_SUFFIX))
        .and_then(|inner| inner.parse::<serde_json::Number>().ok())
    {
        return Value::Number(number);
    }
    if stored.starts_with('{') || stored.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Value>(stored) {
            return parsed;
        }
    }
    Value::String(stored.to_string())
}
