//! Logging decorator around a [`Transport`].
//!
//! Every outbound call gets a short correlation id and a completion line with
//! method, URL, status and duration. Headers and bodies are logged from
//! redacted copies; the request and response that downstream code sees are
//! byte-identical to what the inner transport handled. Telemetry can never
//! fail a call: the decorator returns the inner result untouched.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::redact::{redact_body, redact_header_value, truncate_body};
use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// Default character budget for logged bodies.
pub const DEFAULT_BODY_LIMIT: usize = 2_000;

/// Smallest budget the decorator will honor.
pub const MIN_BODY_LIMIT: usize = 200;

pub struct LoggingTransport {
    inner: Arc<dyn Transport>,
    body_limit: usize,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self::with_body_limit(inner, DEFAULT_BODY_LIMIT)
    }

    pub fn with_body_limit(inner: Arc<dyn Transport>, body_limit: usize) -> Self {
        Self {
            inner,
            body_limit: body_limit.max(MIN_BODY_LIMIT),
        }
    }

    fn log_request(&self, id: &str, request: &TransportRequest) {
        debug!(id, method = %request.method, url = %request.url, "request");
        for (name, value) in &request.headers {
            debug!(id, header = %name, value = redact_header_value(name, value), "request header");
        }
        if let Some(body) = &request.body {
            let logged = truncate_body(&redact_body(body), self.body_limit);
            debug!(id, body = %logged, "request body");
        }
    }

    fn log_response(
        &self,
        id: &str,
        request: &TransportRequest,
        elapsed_ms: u64,
        outcome: &Result<TransportResponse, TransportError>,
    ) {
        match outcome {
            Ok(response) => {
                debug!(
                    id,
                    method = %request.method,
                    url = %request.url,
                    status = response.status,
                    elapsed_ms,
                    "response"
                );
                if !response.body.is_empty() {
                    let logged = truncate_body(&redact_body(&response.body), self.body_limit);
                    debug!(id, body = %logged, "response body");
                }
            }
            Err(error) => {
                warn!(
                    id,
                    method = %request.method,
                    url = %request.url,
                    elapsed_ms,
                    timeout = error.is_timeout(),
                    error = %error,
                    "transport failure"
                );
            }
        }
    }
}

impl Transport for LoggingTransport {
    fn execute<'a>(
        &'a self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let id = short_id();
            self.log_request(&id, &request);

            let started = Instant::now();
            let outcome = self.inner.execute(request.clone()).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            self.log_response(&id, &request, elapsed_ms, &outcome);
            outcome
        })
    }
}

/// First 8 hex characters of a v4 uuid; enough to correlate lines per call.
fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingTransport {
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl Transport for RecordingTransport {
        fn execute<'a>(
            &'a self,
            request: TransportRequest,
        ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>>
        {
            Box::pin(async move {
                self.seen.lock().unwrap().push(request);
                Ok(TransportResponse::ok_json(r#"{"token":"real-value"}"#))
            })
        }
    }

    #[tokio::test]
    async fn decorator_passes_request_and_response_through_unmodified() {
        let recording = Arc::new(RecordingTransport {
            seen: Mutex::new(Vec::new()),
        });
        let logging = LoggingTransport::new(recording.clone());

        let request = TransportRequest::get("https://example.test/api/v1/partes")
            .with_bearer_token("secret")
            .with_json_body(r#"{"password":"hunter2"}"#);
        let response = logging.execute(request.clone()).await.expect("inner ok");

        // The inner transport saw the unredacted request.
        let seen = recording.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], request);
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"password":"hunter2"}"#));

        // The caller reads the unredacted response.
        assert_eq!(response.body, r#"{"token":"real-value"}"#);
    }

    #[test]
    fn short_ids_are_eight_characters() {
        assert_eq!(short_id().len(), 8);
    }

    #[test]
    fn body_limit_has_a_floor() {
        let transport = LoggingTransport::with_body_limit(Arc::new(crate::transport::NoopTransport), 10);
        assert_eq!(transport.body_limit, MIN_BODY_LIMIT);
    }
}
