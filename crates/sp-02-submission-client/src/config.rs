//! Client configuration.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Default REST API endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_REST_API_URL: &str = "SPARTS_REST_API_URL";
pub const ENV_AUTH_USER: &str = "SPARTS_AUTH_USER";
pub const ENV_AUTH_PASSWORD: &str = "SPARTS_AUTH_PASSWORD";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SPARTS_REQUEST_TIMEOUT_SECS";

/// HTTP basic auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: Option<String>,
}

/// REST client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; a bare `host:port` is treated as `http://`.
    pub base_url: String,
    /// Timeout for a single request. Status polls add their wait on top.
    pub request_timeout: Duration,
    pub auth: Option<BasicAuth>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            auth: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_auth(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.auth = Some(BasicAuth {
            user: user.into(),
            password,
        });
        self
    }

    /// Defaults overridden by `SPARTS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_REST_API_URL) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            match secs.parse::<u64>() {
                Ok(secs) => config.request_timeout = Duration::from_secs(secs),
                Err(_) => warn!(value = %secs, "Ignoring invalid {}", ENV_REQUEST_TIMEOUT_SECS),
            }
        }
        if let Some(user) = lookup(ENV_AUTH_USER) {
            config.auth = Some(BasicAuth {
                user,
                password: lookup(ENV_AUTH_PASSWORD),
            });
        }

        config
    }

    /// Base URL with a scheme and without a trailing slash.
    pub fn normalized_base_url(&self) -> String {
        let url = self.base_url.trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{url}")
        }
    }
}
