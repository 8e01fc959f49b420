//! Mock transport for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! nvisy-gemini = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nvisy_gemini::mock::MockTransport;
//!
//! let transport = MockTransport::new()
//!     .with_json(200, serde_json::json!({ "text": "a cat" }))
//!     .with_response(500, "internal error");
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use url::Url;

use crate::{Error, Result, Transport, TransportResponse};

/// A request observed by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Full request URL, including the query string.
    pub url: Url,
    /// Request body decoded as JSON (`Null` if it was not valid JSON).
    pub body: Value,
}

#[derive(Debug, Clone)]
enum MockReply {
    Response(TransportResponse),
    Failure(String),
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    requests: Vec<RecordedRequest>,
}

/// Transport returning scripted replies in order.
///
/// Clones share the same script and request log, so a clone can be handed
/// to an analyzer while the original is inspected afterwards. Once the
/// script is exhausted every call fails with a network error.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with a raw body.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let response = TransportResponse::new(status, body);
        self.push(MockReply::Response(response));
        self
    }

    /// Queues a reply with a JSON body.
    #[must_use]
    pub fn with_json(self, status: u16, body: Value) -> Self {
        self.with_response(status, body.to_string())
    }

    /// Queues a failure that produces no HTTP response.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Failure(message.into()));
        self
    }

    /// Returns the requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    fn push(&self, reply: MockReply) {
        self.lock().replies.push_back(reply);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<TransportResponse> {
        let mut state = self.lock();

        state.requests.push(RecordedRequest {
            url: url.clone(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });

        match state.replies.pop_front() {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Failure(message)) => Err(Error::network_error().with_message(message)),
            None => Err(Error::network_error().with_message("No scripted response left")),
        }
    }
}
