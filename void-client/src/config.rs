//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use void_types::StreamError;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "VOID_BASE_URL";
/// Environment variable overriding [`ClientConfig::stream_path`].
pub const ENV_STREAM_PATH: &str = "VOID_STREAM_PATH";
/// Environment variable overriding [`ClientConfig::connect_timeout_ms`].
pub const ENV_CONNECT_TIMEOUT_MS: &str = "VOID_CONNECT_TIMEOUT_MS";

/// Where and how the client reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the streaming chat endpoint.
    #[serde(default = "default_stream_path")]
    pub stream_path: String,

    /// Upper bound on establishing the connection. The body read itself is
    /// never timed out; cancel the handle to bound it.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Keep cookies set by the backend and send them on later requests.
    #[serde(default = "default_cookies")]
    pub cookies: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_stream_path() -> String {
    "/api/stream-chat".into()
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_cookies() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stream_path: default_stream_path(),
            connect_timeout_ms: default_connect_timeout_ms(),
            cookies: default_cookies(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `VOID_BASE_URL`, `VOID_STREAM_PATH` and
    /// `VOID_CONNECT_TIMEOUT_MS` when set.
    pub fn from_env() -> Result<Self, StreamError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StreamError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(path) = lookup(ENV_STREAM_PATH) {
            config.stream_path = path;
        }
        if let Some(ms) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            config.connect_timeout_ms = ms.trim().parse().map_err(|e| {
                StreamError::InvalidConfig(format!("{ENV_CONNECT_TIMEOUT_MS}={ms:?}: {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL with a host and the
    /// path is rooted.
    pub fn validate(&self) -> Result<(), StreamError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            StreamError::InvalidConfig(format!("base_url {:?}: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(StreamError::InvalidConfig(format!(
                "base_url must be an http:// or https:// URL with a host, got {:?}",
                self.base_url
            )));
        }
        if !self.stream_path.starts_with('/') {
            return Err(StreamError::InvalidConfig(format!(
                "stream_path must start with '/', got {:?}",
                self.stream_path
            )));
        }
        Ok(())
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.stream_path)
    }

    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
