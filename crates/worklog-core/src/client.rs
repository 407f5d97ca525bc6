//! Typed API client over the [`Transport`] seam.
//!
//! Failure contract, in one place:
//!
//! - non-2xx status: [`ApiError`], built once and propagated unchanged;
//! - transport never reached a response: [`ClientError::Connectivity`];
//! - 2xx body that fails to decode: logged and returned as `Ok(None)` —
//!   "no usable data", deliberately not an error;
//! - empty 2xx body: `Ok(None)`.
//!
//! Every call takes a [`CancellationToken`] and resolves to
//! [`ClientError::Cancelled`] as soon as the token fires.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::codec;
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::logging::LoggingTransport;
use crate::models::{LoginOutcome, LoginRequest, LoginResponse};
use crate::session::{Session, COOKIE_SESSION_TOKEN};
use crate::transport::{Method, ReqwestTransport, Transport, TransportRequest};

/// Health probe paths, tried in order by [`ApiClient::ping`].
pub const HEALTH_PATHS: [&str; 4] = ["/api/v1/health", "/health", "/api/health", "/"];

/// Normalize a request path: empty or whitespace maps to `/`, a missing
/// leading slash is inserted, existing content is untouched.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return String::from("/");
    }
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl ApiClient {
    /// Production composition: logging decorator over the reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        let config = config.normalized();
        let inner: Arc<dyn Transport> = Arc::new(ReqwestTransport::new());
        let transport = Arc::new(LoggingTransport::with_body_limit(
            inner,
            config.log_body_limit,
        ));
        Self {
            config,
            transport,
            session: Arc::new(Session::new()),
        }
    }

    /// Compose over an arbitrary transport (tests, alternate stacks). The
    /// caller decides whether to wrap it in [`LoggingTransport`].
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            config: config.normalized(),
            transport,
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url_for(&self, path: &str) -> String {
        // base ends with exactly one '/', path starts with one: drop one.
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn build_request(&self, method: Method, path: &str) -> TransportRequest {
        let mut request = TransportRequest::new(method, self.url_for(path))
            .with_timeout_ms(self.config.timeout_ms)
            .with_header("accept", "application/json");
        if let Some(token) = self.session.bearer_token().await {
            request = request.with_bearer_token(&token);
        }
        request
    }

    /// Execute a request, racing it against cancellation, and turn a non-2xx
    /// status into an [`ApiError`] for the given path.
    async fn send(
        &self,
        request: TransportRequest,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<crate::transport::TransportResponse, ClientError> {
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            outcome = self.transport.execute(request) => outcome?,
        };
        if !response.is_success() {
            return Err(ApiError::from_response(response.status, path, &response.body).into());
        }
        Ok(response)
    }

    /// GET a typed resource. `Ok(None)` means "no usable data": an empty body
    /// or one that did not decode into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, ClientError> {
        let path = normalize_path(path);
        let request = self.build_request(Method::Get, &path).await;
        let response = self.send(request, &path, cancel).await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(codec::decode(&response.body))
    }

    /// POST a payload and decode the response.
    ///
    /// A response that fails to decode yields `Ok(None)` exactly like
    /// [`get`](Self::get), even though the mutation succeeded server-side;
    /// callers already hold the payload they sent and patch the cache from it.
    pub async fn post<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Req,
        cancel: &CancellationToken,
    ) -> Result<Option<Res>, ClientError> {
        self.write(Method::Post, path, payload, cancel).await
    }

    /// PUT a payload and decode the response. Same contract as
    /// [`post`](Self::post).
    pub async fn put<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Req,
        cancel: &CancellationToken,
    ) -> Result<Option<Res>, ClientError> {
        self.write(Method::Put, path, payload, cancel).await
    }

    async fn write<Req: Serialize, Res: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &Req,
        cancel: &CancellationToken,
    ) -> Result<Option<Res>, ClientError> {
        let path = normalize_path(path);
        let body = codec::encode(payload)?;
        let request = self
            .build_request(method, &path)
            .await
            .with_json_body(body);
        let response = self.send(request, &path, cancel).await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(codec::decode(&response.body))
    }

    /// Fire-and-forget POST with an empty JSON body, for state-transition
    /// actions. Raises on non-2xx, returns nothing on success.
    pub async fn post_action(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let path = normalize_path(path);
        let request = self
            .build_request(Method::Post, &path)
            .await
            .with_json_body("{}");
        self.send(request, &path, cancel).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), ClientError> {
        let path = normalize_path(path);
        let request = self.build_request(Method::Delete, &path).await;
        self.send(request, &path, cancel).await?;
        Ok(())
    }

    /// Authenticate and record the session token.
    ///
    /// Servers that answer with an explicit `token` field get it stored as
    /// the bearer token; servers that authenticate with a session cookie get
    /// the [`COOKIE_SESSION_TOKEN`] sentinel recorded instead, so the rest of
    /// the system can treat the session as authenticated either way.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<LoginOutcome, ClientError> {
        let payload = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let login_path = self.config.login_path.clone();
        let response: Option<LoginResponse> = self.post(&login_path, &payload, cancel).await?;
        let response = response.unwrap_or_default();

        let token = response
            .token
            .unwrap_or_else(|| COOKIE_SESSION_TOKEN.to_owned());
        self.session.set_bearer_token(&token).await;

        Ok(LoginOutcome {
            token,
            user: response.user,
        })
    }

    /// Forget the session: token gone, cache dropped.
    pub async fn logout(&self) {
        self.session.clear_token().await;
        self.session.cache().clear_all().await;
    }

    /// Probe the health-check paths in order; true on the first 2xx. Never
    /// errors: connectivity failures, bad statuses and cancellation all read
    /// as "not reachable".
    pub async fn ping(&self, cancel: &CancellationToken) -> bool {
        for path in HEALTH_PATHS {
            let request = self.build_request(Method::Get, path).await;
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return false,
                outcome = self.transport.execute(request) => outcome,
            };
            match outcome {
                Ok(response) if response.is_success() => return true,
                Ok(response) => {
                    debug!(path, status = response.status, "health probe rejected");
                }
                Err(error) => {
                    debug!(path, %error, "health probe failed");
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_handles_empty_and_missing_slash() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("   "), "/");
        assert_eq!(normalize_path("api/v1/partes"), "/api/v1/partes");
        assert_eq!(normalize_path("/api/v1/partes"), "/api/v1/partes");
    }

    #[test]
    fn normalize_path_introduces_no_double_slash() {
        for input in ["", "  ", "a", "/a", "a/b", "/a/b"] {
            let normalized = normalize_path(input);
            assert!(normalized.starts_with('/'));
            assert!(!normalized.starts_with("//"), "double slash from {input:?}");
        }
    }

    #[test]
    fn url_join_produces_single_slash_boundary() {
        let client = ApiClient::with_transport(
            ClientConfig::new("https://api.test", "/login"),
            Arc::new(crate::transport::NoopTransport),
            Arc::new(Session::new()),
        );

        assert_eq!(
            client.url_for("/api/v1/partes"),
            "https://api.test/api/v1/partes"
        );
    }
}
