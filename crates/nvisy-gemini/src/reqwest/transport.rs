//! Reqwest-based transport for the `generateContent` endpoint.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{GeminiConfig, Result, TRACING_TARGET_TRANSPORT, Transport, TransportResponse};

/// Inner client that holds the HTTP client.
struct ReqwestTransportInner {
    http: Client,
    user_agent: String,
}

/// Reqwest-based HTTP transport.
///
/// The underlying connection pool is shared behind an `Arc`, so clones
/// reuse connections.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Arc<ReqwestTransportInner>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("user_agent", &self.inner.user_agent)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a new transport from the client configuration.
    ///
    /// Only the timeout and user agent are taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let user_agent = config.effective_user_agent();
        let timeout = config.timeout();

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            timeout_ms = timeout.map(|t| t.as_millis() as u64),
            user_agent = %user_agent,
            "Creating reqwest transport"
        );

        let mut builder = Client::builder().user_agent(&user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        tracing::info!(
            target: TRACING_TARGET_TRANSPORT,
            "Reqwest transport created successfully"
        );

        Ok(Self {
            inner: Arc::new(ReqwestTransportInner { http, user_agent }),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<TransportResponse> {
        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            host = url.host_str().unwrap_or_default(),
            path = url.path(),
            body_len = body.len(),
            "Sending request"
        );

        let http_response = self
            .http()
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = http_response.status().as_u16();
        let body = http_response.bytes().await?;

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            status_code = status,
            body_len = body.len(),
            "Received response"
        );

        Ok(TransportResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(&GeminiConfig::default()).unwrap();
        assert!(transport.inner.user_agent.starts_with("nvisy-gemini/"));
    }

    #[test]
    fn test_transport_with_timeout() {
        let config = GeminiConfig::new("key")
            .with_timeout(5)
            .with_user_agent("custom-agent/1.0");
        let transport = ReqwestTransport::new(&config).unwrap();

        assert_eq!(transport.inner.user_agent, "custom-agent/1.0");
        assert!(format!("{transport:?}").contains("custom-agent/1.0"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let transport = ReqwestTransport::new(&GeminiConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/models/test:generateContent").unwrap();

        let error = transport.post_json(&url, b"{}".to_vec()).await.unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::NetworkError);
    }
}
