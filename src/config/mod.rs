//! Configuration module for the kelner client.
//!
//! Provides configuration management for the service endpoint and
//! request timeout.

use std::time::Duration;
use url::Url;

use crate::errors::{KelnerError, KelnerResult};

/// Default endpoint for a locally running kelner server (port 0xf00d).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:61453";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the kelner client.
#[derive(Debug, Clone)]
pub struct KelnerConfig {
    /// Endpoint URL the file payload is posted to.
    pub endpoint: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl KelnerConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> KelnerConfigBuilder {
        KelnerConfigBuilder::new()
    }
}

impl Default for KelnerConfig {
    fn default() -> Self {
        Self {
            // DEFAULT_ENDPOINT is a valid literal.
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Builder for `KelnerConfig`.
#[derive(Debug, Default)]
pub struct KelnerConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl KelnerConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> KelnerResult<KelnerConfig> {
        let endpoint = match self.endpoint {
            Some(raw) => {
                let url = Url::parse(&raw)?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(KelnerError::configuration(format!(
                        "Endpoint must be http or https, got '{}'",
                        url.scheme()
                    )));
                }
                url
            }
            None => KelnerConfig::default().endpoint,
        };

        Ok(KelnerConfig {
            endpoint,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = KelnerConfig::default();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:61453/");
        assert_eq!(config.endpoint.port(), Some(0xf00d));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_builder_success() {
        let config = KelnerConfig::builder()
            .endpoint("http://classifier.internal:8080")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.endpoint.host_str(), Some("classifier.internal"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_builder_defaults_endpoint() {
        let config = KelnerConfig::builder().build().unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:61453/");
    }

    #[test]
    fn test_config_builder_rejects_invalid_url() {
        let result = KelnerConfig::builder().endpoint("not a url").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder_rejects_non_http_scheme() {
        let result = KelnerConfig::builder().endpoint("ftp://host/path").build();
        assert!(matches!(
            result,
            Err(KelnerError::Configuration { .. })
        ));
    }
}
