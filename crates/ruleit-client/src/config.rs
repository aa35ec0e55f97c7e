//! Client configuration
//!
//! The base endpoint is an explicit value injected at gateway construction,
//! never process-wide state. The core imposes no timeout of its own; a
//! deployment that wants one sets it here and it applies to every round
//! trip the gateway makes.

use std::time::Duration;

/// Base URL of the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// Configuration for a [`RuleApiGateway`](crate::RuleApiGateway).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote service
    pub base_url: String,

    /// Optional per-request timeout; `None` means the transport default
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for an API path, tolerating a trailing slash on the
    /// base and a leading slash on the path.
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
    fn test_default_points_at_dev_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_endpoint_joins_without_doubled_slashes() {
        let config = ClientConfig::new("http://rules.example.com/");
        assert_eq!(
            config.endpoint("/api/create-rule/"),
            "http://rules.example.com/api/create-rule/"
        );
        let bare = ClientConfig::new("http://rules.example.com");
        assert_eq!(
            bare.endpoint("api/rules/?page=2"),
            "http://rules.example.com/api/rules/?page=2"
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.1:9000")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.base_url, "http://10.0.0.1:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
