//! Client configuration: server location and request defaults.

use serde::Deserialize;

use crate::logging::DEFAULT_BODY_LIMIT;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Where the API lives and how requests behave.
///
/// Normalization happens on construction: the base URL always ends with
/// exactly one `/`, the login path always starts with exactly one `/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub login_path: String,
    pub timeout_ms: u64,
    pub log_body_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/"),
            login_path: String::from("/api/v1/login"),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, login_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: login_path.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Read overrides from `WORKLOG_BASE_URL` and `WORKLOG_LOGIN_PATH`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("WORKLOG_BASE_URL").unwrap_or(defaults.base_url),
            login_path: std::env::var("WORKLOG_LOGIN_PATH").unwrap_or(defaults.login_path),
            ..defaults
        }
        .normalized()
    }

    /// Enforce the URL/path invariants. Idempotent.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = format!("{trimmed}/");

        let login = self.login_path.trim().trim_start_matches('/');
        self.login_path = format!("/{login}");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_ends_with_exactly_one_slash() {
        assert_eq!(
            ClientConfig::new("https://api.test", "/login").base_url,
            "https://api.test/"
        );
        assert_eq!(
            ClientConfig::new("https://api.test///", "/login").base_url,
            "https://api.test/"
        );
    }

    #[test]
    fn login_path_starts_with_exactly_one_slash() {
        assert_eq!(
            ClientConfig::new("https://api.test", "api/v1/login").login_path,
            "/api/v1/login"
        );
        assert_eq!(
            ClientConfig::new("https://api.test", "//api/v1/login").login_path,
            "/api/v1/login"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = ClientConfig::new("https://api.test", "/login");
        let twice = once.clone().normalized();

        assert_eq!(once.base_url, twice.base_url);
        assert_eq!(once.login_path, twice.login_path);
    }
}
