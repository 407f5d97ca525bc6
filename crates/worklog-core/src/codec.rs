//! JSON codec used on the read and write paths.
//!
//! Reads are tolerant of property-name casing: object keys are normalized to
//! snake_case (`StartTime`, `startTime` and `start_time` all land on the same
//! field) before deserialization. Writes omit `null` members so optional
//! fields left unset never reach the server.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Decode a response body into `T`, tolerating any property-name casing.
///
/// Returns `None` when the body cannot be parsed or does not fit `T`; the
/// failure is logged, never raised. Callers must treat `None` as "no usable
/// data".
pub fn decode<T: DeserializeOwned>(body: &str) -> Option<T> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "response body is not valid JSON");
            return None;
        }
    };
    match serde_json::from_value(normalize_keys(value)) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(%error, "response body did not match the expected shape");
            None
        }
    }
}

/// Encode a request payload, dropping every `null` object member.
pub fn encode<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(payload)?;
    strip_nulls(&mut value);
    serde_json::to_string(&value)
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, entry)| (snake_key(&key), normalize_keys(entry)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a key to snake_case. An underscore is inserted only at a
/// lower-to-upper boundary, so acronym keys like `ID` collapse to `id`.
fn snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in key.chars() {
        if ch.is_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(ch);
            prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, entry| !entry.is_null());
            for entry in map.values_mut() {
                strip_nulls(entry);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                strip_nulls(item);
            }
        }
        _ => {}
    }
}
