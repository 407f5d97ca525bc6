//! Per-process session context: the bearer token and the response cache.
//!
//! One `Session` is created at startup and shared via `Arc` with every
//! component that needs it. There is no global state; "one session per
//! process" is a convention of the composition root, not a singleton.

use tokio::sync::RwLock;

use crate::cache::ResponseCache;

/// Sentinel recorded when the server authenticates with a session cookie and
/// returns no token of its own. Cookie-auth servers ignore the Authorization
/// header built from it, and it keeps authentication a single token check.
pub const COOKIE_SESSION_TOKEN: &str = "cookie-session";

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
    cache: ResponseCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, absent until login.
    pub async fn bearer_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_bearer_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Clear the token entirely; subsequent requests carry no Authorization
    /// header (not an empty one).
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}
