//! Dashboard configuration parsed from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const SESSION_DIR_NAME: &str = "polydros-dash";
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,
    pub poll_interval: Duration,
    pub timeouts: HttpTimeouts,
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeouts: HttpTimeouts::default(),
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `POLYDROS_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `POLYDROS_POLL_INTERVAL_MS`: default 2000
    /// - `POLYDROS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `POLYDROS_CONNECT_TIMEOUT_SECS`: default 5
    /// - `POLYDROS_SESSION_FILE`: default `$TMPDIR/polydros-dash/session.json`
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("POLYDROS_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), |v| normalize_base_url(&v));
        let poll_ms = env_parse("POLYDROS_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS).max(1);
        let timeouts = HttpTimeouts {
            request_secs: env_parse("POLYDROS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("POLYDROS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let session_file = std::env::var_os("POLYDROS_SESSION_FILE")
            .filter(|v| !v.is_empty())
            .map_or_else(default_session_file, PathBuf::from);

        Self { base_url, poll_interval: Duration::from_millis(poll_ms), timeouts, session_file }
    }
}

/// Trim whitespace and trailing slashes so paths can be appended with `/`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[must_use]
pub fn default_session_file() -> PathBuf {
    std::env::temp_dir().join(SESSION_DIR_NAME).join(SESSION_FILE_NAME)
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
