//! Classification service.
//!
//! One request in, one response out: load a file, POST its raw bytes to
//! the endpoint, label the returned score vector. No retry, no streaming.

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::{KelnerError, KelnerResult};
use crate::format::first_score_vector;
use crate::loader::{FileContent, FileLoader};
use crate::transport::{HttpRequest, HttpTransport, TransportError};
use crate::types::{attach_labels, top_k, LabeledScore};

/// Classification service posting file payloads to a kelner server.
pub struct ClassificationService {
    transport: Arc<dyn HttpTransport>,
    loader: FileLoader,
}

impl ClassificationService {
    /// Creates a new classification service.
    pub fn new(transport: Arc<dyn HttpTransport>, loader: FileLoader) -> Self {
        Self { transport, loader }
    }

    /// Classifies a file and returns at most `top` labeled scores, sorted
    /// descending.
    ///
    /// Labels align to the score vector by index; positions past the end
    /// of the label list get `"#<index>"` placeholders. Returns fewer than
    /// `top` entries when the score vector is shorter.
    #[instrument(skip(self, labels), fields(path = %path.as_ref().display(), top))]
    pub async fn classify(
        &self,
        path: impl AsRef<Path>,
        labels: &[String],
        top: usize,
    ) -> KelnerResult<Vec<LabeledScore>> {
        let content = self.loader.load(path).await?;
        let response = self.submit(&content).await?;
        let scores = first_score_vector(&response)?;
        Ok(top_k(attach_labels(&scores, labels), top))
    }

    /// Posts loaded file content to the endpoint and parses the JSON
    /// response body.
    ///
    /// The body is always the original raw file bytes, never re-encoded
    /// decoded text, so `Content-Length` always matches what is sent.
    #[instrument(skip(self, content), fields(content_type = %content.content_type(), size = content.size))]
    pub async fn submit(&self, content: &FileContent) -> KelnerResult<Value> {
        let request = HttpRequest::post(content.data.clone())
            .with_header("Content-Type", content.content_type())
            .with_header("Content-Length", content.size.to_string());

        let response = self.transport.send(request).await.map_err(map_transport)?;

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body);
            return Err(KelnerError::server(response.status, body.into_owned()));
        }

        response
            .json::<Value>()
            .map_err(|e| KelnerError::response(format!("Invalid JSON body: {}", e)))
    }
}

fn map_transport(err: TransportError) -> KelnerError {
    match err {
        TransportError::Timeout { timeout } => KelnerError::Timeout {
            message: format!("No response within {:?}", timeout),
        },
        TransportError::Connection { message } => KelnerError::Network {
            message,
            cause: None,
        },
        TransportError::InvalidResponse { message } => KelnerError::Network {
            message,
            cause: None,
        },
    }
}

impl std::fmt::Debug for ClassificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport};
    use bytes::Bytes;
    use serde_json::json;
    use std::io::Write;

    fn service_with(transport: Arc<MockTransport>) -> ClassificationService {
        ClassificationService::new(transport, FileLoader::new())
    }

    fn temp_text_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_classify_returns_sorted_top_k() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&json!([[0.1, 0.9, 0.4]]));

        let (_dir, path) = temp_text_file("payload");
        let labels = vec!["cat".to_string(), "dog".to_string()];

        let result = service_with(Arc::clone(&transport))
            .classify(&path, &labels, 2)
            .await
            .unwrap();

        assert_eq!(
            result,
            vec![LabeledScore::new("dog", 0.9), LabeledScore::new("#2", 0.4)]
        );
    }

    #[tokio::test]
    async fn test_classify_sets_content_headers() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&json!([[1.0]]));

        let (_dir, path) = temp_text_file("seven b");

        service_with(Arc::clone(&transport))
            .classify(&path, &[], 1)
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"text/plain".to_string())
        );
        assert_eq!(request.headers.get("Content-Length"), Some(&"7".to_string()));
        assert_eq!(&request.body[..], b"seven b");
    }

    #[tokio::test]
    async fn test_classify_top_larger_than_scores() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&json!([[0.6, 0.4]]));

        let (_dir, path) = temp_text_file("x");

        let result = service_with(transport)
            .classify(&path, &[], 10)
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_surfaces_server_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::error(500, "model exploded"));

        let content = FileContent {
            data: Bytes::from_static(b"x"),
            text: None,
            mime: None,
            size: 1,
        };

        let result = service_with(transport).submit(&content).await;
        assert!(matches!(
            result,
            Err(KelnerError::Server { status_code: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_rejects_non_json_body() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::raw(200, b"definitely not json".to_vec()));

        let content = FileContent {
            data: Bytes::from_static(b"x"),
            text: None,
            mime: None,
            size: 1,
        };

        let result = service_with(transport).submit(&content).await;
        assert!(matches!(result, Err(KelnerError::Response { .. })));
    }

    #[tokio::test]
    async fn test_classify_rejects_response_without_score_vector() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&json!({"scores": [0.5]}));

        let (_dir, path) = temp_text_file("x");

        let result = service_with(transport).classify(&path, &[], 1).await;
        assert!(matches!(result, Err(KelnerError::Response { .. })));
    }

    #[tokio::test]
    async fn test_classify_missing_file_fails_before_request() {
        let transport = Arc::new(MockTransport::new());

        let result = service_with(Arc::clone(&transport))
            .classify("/nonexistent/input.txt", &[], 1)
            .await;

        assert!(matches!(result, Err(KelnerError::File { .. })));
        assert_eq!(transport.request_count(), 0);
    }
}
