//! Secret redaction for logged requests and responses.
//!
//! Everything here operates on copies destined for the log; the bytes that
//! actually travel the wire are never touched.

use serde_json::Value;

pub const PLACEHOLDER: &str = "[redacted]";

/// Header names whose values must never reach the log.
const SECRET_HEADERS: [&str; 3] = ["authorization", "cookie", "set-cookie"];

/// JSON keys whose values must never reach the log.
const SECRET_KEYS: [&str; 9] = [
    "password",
    "pass",
    "pwd",
    "token",
    "accesstoken",
    "access_token",
    "refreshtoken",
    "refresh_token",
    "jwt",
];

/// Patterns used for the best-effort fallback when a body is not valid JSON.
const FALLBACK_PATTERNS: [&str; 3] = ["\"password\":\"", "\"pass\":\"", "\"token\":\""];

pub fn is_secret_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SECRET_HEADERS.contains(&name.as_str())
}

/// Returns the loggable value for a header: the real value for ordinary
/// headers, the placeholder for secret-bearing ones.
pub fn redact_header_value<'a>(name: &str, value: &'a str) -> &'a str {
    if is_secret_header(name) {
        PLACEHOLDER
    } else {
        value
    }
}

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SECRET_KEYS.contains(&key.as_str())
}

/// Produce a redacted copy of a body for logging.
///
/// If the body parses as JSON, every value under a secret key is replaced
/// recursively. Otherwise a literal substring substitution covers the common
/// credential patterns. Infallible: the worst case is returning the input
/// unchanged.
pub fn redact_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            redact_value(&mut value);
            value.to_string()
        }
        Err(_) => redact_raw(body),
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if is_secret_key(key) {
                    *entry = Value::String(PLACEHOLDER.to_owned());
                } else {
                    redact_value(entry);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                redact_value(item);
            }
        }
        _ => {}
    }
}

/// Best-effort substitution for non-JSON bodies: blank out the value span
/// following each known `"key":"` pattern up to the closing quote.
fn redact_raw(body: &str) -> String {
    let mut result = body.to_owned();
    for pattern in FALLBACK_PATTERNS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let value_start = search_from + found + pattern.len();
            let value_end = match result[value_start..].find('"') {
                Some(offset) => value_start + offset,
                None => result.len(),
            };
            result.replace_range(value_start..value_end, PLACEHOLDER);
            search_from = value_start + PLACEHOLDER.len();
        }
    }
    result
}

/// Truncate a body to a character budget, marking the cut.
pub fn truncate_body(body: &str, limit: usize) -> String {
    if body.chars().count() <= limit {
        return body.to_owned();
    }
    let mut truncated: String = body.chars().take(limit).collect();
    truncated.push_str("…[truncated]");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header_is_replaced() {
        assert_eq!(
            redact_header_value("Authorization", "Bearer secret-token"),
            PLACEHOLDER
        );
        assert_eq!(redact_header_value("Accept", "application/json"), "application/json");
    }

    #[test]
    fn secret_keys_are_redacted_case_insensitively() {
        let body = r#"{"email":"a@b.test","Password":"hunter2","nested":{"accessToken":"abc"}}"#;
        let redacted = redact_body(body);

        assert!(!redacted.contains("hunter2"));
        assert!(!redacted.contains("abc\""));
        assert!(redacted.contains("a@b.test"));
        assert!(redacted.contains(PLACEHOLDER));
    }

    #[test]
    fn secrets_inside_arrays_are_redacted() {
        let body = r#"[{"token":"t1"},{"token":"t2"}]"#;
        let redacted = redact_body(body);

        assert!(!redacted.contains("t1"));
        assert!(!redacted.contains("t2"));
    }

    #[test]
    fn non_json_body_falls_back_to_pattern_substitution() {
        let body = r#"garbage "password":"hunter2" trailing"#;
        let redacted = redact_body(body);

        assert!(!redacted.contains("hunter2"));
        assert!(redacted.contains(PLACEHOLDER));
        assert!(redacted.contains("garbage"));
    }

    #[test]
    fn original_body_is_not_mutated() {
        let body = r#"{"password":"hunter2"}"#;
        let _ = redact_body(body);

        assert!(body.contains("hunter2"));
    }

    #[test]
    fn truncation_respects_character_budget() {
        let body = "a".repeat(50);

        assert_eq!(truncate_body(&body, 50), body);
        assert!(truncate_body(&body, 10).starts_with("aaaaaaaaaa"));
        assert!(truncate_body(&body, 10).ends_with("[truncated]"));
    }
}
