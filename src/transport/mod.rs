//! HTTP transport layer for the kelner client.
//!
//! Provides the transport abstraction the classification service is
//! reached through. The whole protocol is a single POST per call, so the
//! trait carries exactly one operation.

mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

/// HTTP request representation.
///
/// There is no method, path, or per-request timeout: every request is a
/// POST to the configured endpoint, and the timeout belongs to the
/// transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Bytes,
}

impl HttpRequest {
    /// Creates a new request with the given body.
    pub fn post(body: Bytes) -> Self {
        Self {
            headers: HashMap::new(),
            body,
        }
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Posts a request to the configured endpoint.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
