//! Tolerant deserializers for model-authored fields
//!
//! Structural rules are enforced by the validator. Everything past those
//! rules is coerced here instead of failing: scalars become text, stray
//! non-object entries become minimal records, and misshapen optional
//! payloads are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys tried, in order, when an object stands in for a piece of text
const TEXT_KEYS: &[&str] = &["text", "label", "title", "name"];

/// Records that can be built from a bare string entry
pub(crate) trait FromText {
    fn from_text(text: String) -> Self;
}

/// Render any JSON value as text; `None` for null
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Object(map) => {
            let label = TEXT_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string);
            Some(label.unwrap_or_else(|| Value::Object(map).to_string()))
        }
        other => Some(other.to_string()),
    }
}

/// Accept any value and keep it as text (null and missing are empty)
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_text).unwrap_or_default())
}

/// Optional variant of [`lenient_string`]
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_text))
}

/// A list of strings; a lone scalar becomes a one-element list
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(entries)) => entries.into_iter().filter_map(value_text).collect(),
        Some(other) => value_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Booleans, plus the strings "true" and "false"
pub(crate) fn lenient_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => Some(flag),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// An object payload; anything else is treated as absent
pub(crate) fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

/// An array of records; non-arrays are absent and string entries go
/// through [`FromText`]
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromText,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(entries)) = value else {
        return Ok(None);
    };
    Ok(Some(entries.into_iter().filter_map(list_entry).collect()))
}

fn list_entry<T: DeserializeOwned + FromText>(entry: Value) -> Option<T> {
    match entry {
        object @ Value::Object(_) => serde_json::from_value(object).ok(),
        other => value_text(other).map(T::from_text),
    }
}
