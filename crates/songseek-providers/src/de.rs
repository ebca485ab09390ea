//! Lenient field decoding for loosely typed upstream payloads.
//!
//! Upstreams are inconsistent about whether ids and labels arrive as JSON
//! strings or numbers. A strict `String` field would fail the whole record,
//! so text fields go through [`text`] instead. Record lists go through
//! [`records`], which drops entries that do not decode instead of failing
//! the whole list.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Decode a string or number into `Some(String)`; anything else is `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// Decode a JSON array element by element, skipping entries that fail.
///
/// `null` or any non-array value decodes to an empty list.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
