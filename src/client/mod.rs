//! Kelner API client.
//!
//! Provides the main client interface for posting files to a kelner
//! classification server and formatting the results.

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::config::{KelnerConfig, KelnerConfigBuilder};
use crate::errors::{KelnerError, KelnerResult};
use crate::format::{format_response, OutputFormat};
use crate::loader::{FileLoader, MimeGuesser};
use crate::services::ClassificationService;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::LabeledScore;

/// The main kelner client.
///
/// # Example
///
/// ```rust,no_run
/// use kelner_client::KelnerClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KelnerClient::builder()
///         .endpoint("http://127.0.0.1:61453")
///         .build()?;
///
///     let labels = vec!["cat".to_string(), "dog".to_string()];
///     let top = client.classify("photo.jpg", &labels, 3).await?;
///     for entry in top {
///         println!("{}: {}", entry.label, entry.score);
///     }
///     Ok(())
/// }
/// ```
pub struct KelnerClient {
    config: KelnerConfig,
    service: ClassificationService,
}

impl KelnerClient {
    /// Creates a new client builder.
    pub fn builder() -> KelnerClientBuilder {
        KelnerClientBuilder::new()
    }

    /// Creates a client with the default local endpoint.
    pub fn new() -> KelnerResult<Self> {
        KelnerClientBuilder::new().build()
    }

    /// Classifies a file and returns at most `top` labeled scores, sorted
    /// descending by score.
    pub async fn classify(
        &self,
        path: impl AsRef<Path>,
        labels: &[String],
        top: usize,
    ) -> KelnerResult<Vec<LabeledScore>> {
        self.service.classify(path, labels, top).await
    }

    /// Formats a raw service response as JSON or YAML, optionally labeled
    /// and sorted.
    ///
    /// See [`format_response`](crate::format::format_response) for the
    /// exact output shapes.
    pub fn format_output(
        &self,
        response: &Value,
        format: OutputFormat,
        labels: Option<&[String]>,
    ) -> KelnerResult<String> {
        format_response(response, format, labels)
    }

    /// Returns the classification service.
    pub fn service(&self) -> &ClassificationService {
        &self.service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &KelnerConfig {
        &self.config
    }
}

impl std::fmt::Debug for KelnerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KelnerClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the kelner client.
pub struct KelnerClientBuilder {
    config_builder: KelnerConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    guesser: Option<Arc<dyn MimeGuesser>>,
}

impl KelnerClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: KelnerConfigBuilder::new(),
            transport: None,
            guesser: None,
        }
    }

    /// Sets the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.endpoint(endpoint);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom MIME guesser.
    pub fn mime_guesser(mut self, guesser: Arc<dyn MimeGuesser>) -> Self {
        self.guesser = Some(guesser);
        self
    }

    /// Builds the client.
    pub fn build(self) -> KelnerResult<KelnerClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::new(config.endpoint.clone(), config.timeout).map_err(|e| {
                    KelnerError::Configuration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let loader = match self.guesser {
            Some(g) => FileLoader::with_guesser(g),
            None => FileLoader::new(),
        };

        let service = ClassificationService::new(transport, loader);

        Ok(KelnerClient { config, service })
    }
}

impl Default for KelnerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockTransport;
    use serde_json::json;
    use std::io::Write;

    fn mock_client(transport: Arc<MockTransport>) -> KelnerClient {
        KelnerClient::builder()
            .transport(transport)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults_to_local_endpoint() {
        let client = KelnerClient::new().unwrap();
        assert_eq!(client.config().endpoint.as_str(), "http://127.0.0.1:61453/");
    }

    #[test]
    fn test_builder_rejects_bad_endpoint() {
        let result = KelnerClient::builder().endpoint("::::").build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_classify_through_mock_transport() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&json!([[0.1, 0.9, 0.4]]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"payload")
            .unwrap();

        let labels = vec!["cat".to_string(), "dog".to_string()];
        let client = mock_client(Arc::clone(&transport));

        let result = client.classify(&path, &labels, 2).await.unwrap();

        assert_eq!(
            result,
            vec![LabeledScore::new("dog", 0.9), LabeledScore::new("#2", 0.4)]
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_format_output_delegates() {
        let transport = Arc::new(MockTransport::new());
        let client = mock_client(transport);

        let labels = vec!["cat".to_string(), "dog".to_string()];
        let output = client
            .format_output(&json!([[0.1, 0.9]]), OutputFormat::Yaml, Some(&labels))
            .unwrap();

        assert_eq!(output.lines().next(), Some("dog: 0.900000"));
    }
}
