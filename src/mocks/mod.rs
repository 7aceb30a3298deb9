//! Mock implementations for testing.
//!
//! Provides a mock transport for unit testing without a running
//! classification server.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
///
/// Queued responses are returned in order; every request is recorded for
/// later assertions.
pub struct MockTransport {
    responses: Mutex<Vec<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Bytes,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates an error response with a plain-text body.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: message.as_bytes().to_vec(),
        }
    }

    /// Creates a response with an arbitrary body.
    pub fn raw(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        self.responses.lock().unwrap().push(response);
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Sets the default response used when the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_response(&self) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            self.default_response
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| MockResponse::error(500, "No mock response configured"))
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            headers: request.headers.clone(),
            body: request.body.clone(),
        });

        let response = self.next_response();
        Ok(HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_queue_order() {
        let transport = MockTransport::new();
        transport.queue_json(&serde_json::json!([[0.1]]));
        transport.queue(MockResponse::error(429, "slow down"));

        let first = transport
            .send(HttpRequest::post(Bytes::from_static(b"a")))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::post(Bytes::from_static(b"b")))
            .await
            .unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 429);
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.set_default(MockResponse::json(&serde_json::json!([])));

        let request = HttpRequest::post(Bytes::from_static(b"payload"))
            .with_header("Content-Type", "image/png");
        transport.send(request).await.unwrap();

        let recorded = transport.last_request().unwrap();
        assert_eq!(&recorded.body[..], b"payload");
        assert_eq!(
            recorded.headers.get("Content-Type"),
            Some(&"image/png".to_string())
        );
    }

    #[tokio::test]
    async fn test_mock_transport_default_when_queue_empty() {
        let transport = MockTransport::new();

        let response = transport
            .send(HttpRequest::post(Bytes::new()))
            .await
            .unwrap();
        assert_eq!(response.status, 500);
    }
}
