//! Xata client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL of the Xata control plane, used for identity lookups.
pub(crate) const CONTROL_PLANE_URL: &str = "https://api.xata.io";

/// Configuration for the Xata HTTP client.
///
/// `db_url` is the branch-scoped database URL, e.g.
/// `https://my-workspace-abc123.us-east-1.xata.sh/db/docs:main`. All
/// data-plane requests are routed beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XataConfig {
    /// Branch-scoped database URL.
    pub db_url: Url,

    /// Personal API key, sent as a bearer token.
    pub api_key: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl XataConfig {
    /// Creates a new configuration from the two required settings.
    pub fn new(db_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            db_url,
            api_key: api_key.into(),
            http_timeout: default_timeout_secs(),
        }
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_url() -> Url {
        Url::parse("https://ws-abc123.us-east-1.xata.sh/db/docs:main").unwrap()
    }

    #[test]
    fn test_default_timeout() {
        let config = XataConfig::new(db_url(), "xau_test");
        assert_eq!(config.http_timeout, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_with_timeout() {
        let config = XataConfig::new(db_url(), "xau_test").with_timeout(120);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = XataConfig::new(db_url(), "xau_test").with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_deserialize_defaults_timeout() {
        let config: XataConfig = serde_json::from_str(
            r#"{"db_url": "https://ws-abc123.us-east-1.xata.sh/db/docs:main", "api_key": "xau_test"}"#,
        )
        .unwrap();
        assert_eq!(config.http_timeout, DEFAULT_TIMEOUT_SECS);
    }
}
