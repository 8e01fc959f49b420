//! Transport abstraction used by the analyzer.

use bytes::Bytes;
use url::Url;

use crate::Result;

/// Raw HTTP reply: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a new transport response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as lossy UTF-8, truncated to `limit` characters.
    pub fn body_snippet(&self, limit: usize) -> String {
        String::from_utf8_lossy(&self.body).chars().take(limit).collect()
    }
}

/// Core trait for sending a JSON request body to the remote service.
///
/// Implementations report every HTTP response, successful or not, as
/// `Ok`; `Err` is reserved for requests that produced no response.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POSTs a JSON body to `url` and returns the raw reply.
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<TransportResponse>;
}
