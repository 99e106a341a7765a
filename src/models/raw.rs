//! Lenient deserialization for the upstream catalog payload.
//!
//! Upstream records are inconsistent: a field may be absent, a scalar, a
//! list of `{id, name}` reference objects, or a differently-named variant
//! of the same logical field. Every helper here recovers with a
//! type-appropriate default instead of failing, so a single dirty field
//! never drops a record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Coerce any scalar to a string. `null`/missing become the empty string.
pub(crate) fn lossy_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_string(value.unwrap_or(Value::Null)))
}

fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => {
            warn!("Expected scalar, got {}; substituting empty string", type_name(&other));
            String::new()
        }
    }
}

/// Reduce a "named reference" field to its display names.
///
/// Accepted shapes: a list of `{id, name}` (or `{id, nome}`) objects, a
/// list of plain strings, a single raw string, or nothing. A reference
/// missing its name contributes an empty entry so positions downstream
/// stay aligned with the source list.
pub(crate) fn name_refs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(extract_names(value.unwrap_or(Value::Null)))
}

fn extract_names(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().map(reference_name).collect(),
        Value::String(s) => vec![s],
        Value::Null => Vec::new(),
        other => {
            warn!("Expected reference list, got {}; substituting empty list", type_name(&other));
            Vec::new()
        }
    }
}

fn reference_name(item: Value) -> String {
    match item {
        Value::Object(map) => match map.get("nome").or_else(|| map.get("name")) {
            Some(Value::String(s)) => s.clone(),
            _ => {
                warn!("Reference object has no name; keeping empty entry");
                String::new()
            }
        },
        other => coerce_string(other),
    }
}

/// Lenient integer id: a number, a numeric string, or nothing.
pub(crate) fn lossy_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => match s.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Record id '{}' is not an integer; record will be unaddressable", s);
                None
            }
        },
        _ => None,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
