//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a new HTTP transport posting to the given endpoint.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, bytes = request.body.len()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self.client.post(self.endpoint.clone());

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        let response = req_builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout: self.timeout,
                    }
                } else if e.is_connect() {
                    TransportError::Connection {
                        message: e.to_string(),
                    }
                } else {
                    TransportError::InvalidResponse {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse {
                message: e.to_string(),
            })?
            .to_vec();

        tracing::debug!(status, body_bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}
