//! Configuration for the backend client.

use std::time::Duration;

use crate::config::BackendSettings;

/// Default backend base URL (the FastAPI dev server).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of samples requested from `/trajectory`.
pub const DEFAULT_TRAJECTORY_LIMIT: usize = 100;

/// Connection settings shared by the REST client and the stream adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build from the `[backend]` section of the config file.
    pub fn from_settings(settings: &BackendSettings) -> Self {
        Self {
            base_url: settings.url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint path such as `/metrics`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.endpoint("/health"), "http://localhost:8000/health");
        assert_eq!(config.endpoint("metrics"), "http://localhost:8000/metrics");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
