//! Error taxonomy for the data-access layer.
//!
//! Two failure classes cross the client boundary: [`ApiError`] when the server
//! answered with a non-2xx status, and [`TransportError`] when the transport
//! never produced a status at all (DNS, refusal, timeout). Decode failures on
//! 2xx responses are neither; the client downgrades those to `None`.

use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

const RAW_BODY_PREVIEW: usize = 200;

/// Structured HTTP-level error built from a non-2xx response.
///
/// Constructed once at the transport boundary and never re-wrapped; callers
/// receive it exactly as built here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    path: String,
    server_message: Option<String>,
    server_error: Option<String>,
}

impl ApiError {
    /// Build an error from a failed response, extracting any server-provided
    /// text from the JSON body.
    ///
    /// Extraction order: `message`, then `error`; a validation `errors` object
    /// of arrays is flattened into a single `", "`-joined string. A body that
    /// is not JSON contributes its first characters as the message instead.
    pub fn from_response(status: u16, path: impl Into<String>, body: &str) -> Self {
        let path = path.into();
        match serde_json::from_str::<Value>(body) {
            Ok(value) => {
                let server_message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                let server_error = value
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .or_else(|| value.get("errors").and_then(flatten_validation_errors));
                Self {
                    status,
                    path,
                    server_message,
                    server_error,
                }
            }
            Err(_) => {
                let trimmed = body.trim();
                let server_message = if trimmed.is_empty() {
                    None
                } else {
                    Some(truncate_chars(trimmed, RAW_BODY_PREVIEW))
                };
                Self {
                    status,
                    path,
                    server_message,
                    server_error: None,
                }
            }
        }
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let server_text = self
            .server_message
            .as_deref()
            .or(self.server_error.as_deref());
        match server_text {
            Some(text) => write!(
                f,
                "Error {} ({}): {text}",
                self.status,
                status_name(self.status)
            ),
            None => f.write_str(default_message(self.status)),
        }
    }
}

impl std::error::Error for ApiError {}

/// Joins every leaf string of a `{"field": ["msg", ...], ...}` validation
/// object with `", "`. Field iteration follows serde_json's map order.
fn flatten_validation_errors(errors: &Value) -> Option<String> {
    let object = errors.as_object()?;
    let mut parts = Vec::new();
    for messages in object.values() {
        match messages {
            Value::Array(items) => {
                parts.extend(items.iter().filter_map(Value::as_str).map(str::to_owned));
            }
            Value::String(item) => parts.push(item.clone()),
            _ => {}
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

const fn status_name(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "HTTP Error",
    }
}

const fn default_message(status: u16) -> &'static str {
    match status {
        400 => "The server rejected the request as invalid",
        401 => "You are not authorized; please sign in again",
        403 => "You do not have permission to perform this action",
        404 => "The requested resource was not found",
        500 => "The server encountered an internal error",
        503 => "The service is temporarily unavailable",
        _ => "The server returned an unexpected error",
    }
}

/// Failures surfaced by [`crate::ApiClient`] calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("connection error: {0}")]
    Connectivity(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// True when the failure came from the server rather than the network.
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field_from_json_body() {
        let error = ApiError::from_response(400, "/api/v1/partes", r#"{"message":"Invalid date"}"#);

        assert_eq!(error.server_message(), Some("Invalid date"));
        assert_eq!(error.status(), 400);
        assert_eq!(error.path(), "/api/v1/partes");
    }

    #[test]
    fn extracts_error_field_when_message_is_absent() {
        let error = ApiError::from_response(403, "/api/v1/partes/3", r#"{"error":"forbidden"}"#);

        assert_eq!(error.server_message(), None);
        assert_eq!(error.server_error(), Some("forbidden"));
    }

    #[test]
    fn flattens_validation_errors_object() {
        let body = r#"{"errors":{"fecha":["required","must be ISO"],"cliente":["required"]}}"#;
        let error = ApiError::from_response(400, "/api/v1/partes", body);

        assert_eq!(
            error.server_error(),
            Some("required, must be ISO, required")
        );
    }

    #[test]
    fn non_json_body_becomes_truncated_message() {
        let long = "x".repeat(500);
        let error = ApiError::from_response(500, "/api/v1/partes", &long);

        assert_eq!(error.server_message().map(str::len), Some(200));
    }

    #[test]
    fn display_prefixes_server_text_with_status() {
        let error = ApiError::from_response(400, "/p", r#"{"message":"Invalid date"}"#);

        assert_eq!(error.to_string(), "Error 400 (Bad Request): Invalid date");
    }

    #[test]
    fn display_falls_back_to_fixed_defaults() {
        let error = ApiError::from_response(401, "/p", "");

        assert_eq!(
            error.to_string(),
            "You are not authorized; please sign in again"
        );
    }

    #[test]
    fn connectivity_and_api_errors_are_distinct_variants() {
        let api: ClientError = ApiError::from_response(404, "/p", "").into();
        let net: ClientError = TransportError::new("connection refused").into();

        assert!(api.is_api());
        assert!(!net.is_api());
    }
}
