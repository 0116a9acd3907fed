//! Canned transport for tests.
//!
//! Queue responses (or failures) up front, run the code under test, then
//! inspect the requests it sent:
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.respond_json(StatusCode::OK, &json!({"id": "cus_123", "object": "customer"}));
//!
//! let client = StripeClient::new(config, Arc::new(transport.clone()))?;
//! client.customers().retrieve("cus_123", &[]).await?;
//!
//! assert_eq!(transport.last_request().unwrap().url, "https://api.stripe.com/v1/customers/cus_123");
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use http::{HeaderValue, StatusCode};

use crate::ports::{
    HttpRequest, HttpResponse, HttpTransport, TransportError, REQUEST_ID_HEADER,
};

/// Transport that replays queued responses in order.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Inner state (shared so clones observe the same queue).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Outcomes returned by successive calls.
    responses: VecDeque<Result<HttpResponse, TransportError>>,

    /// Every request received, in order.
    requests: Vec<HttpRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a prepared response.
    pub fn push_response(&self, response: HttpResponse) -> &Self {
        self.state().responses.push_back(Ok(response));
        self
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: StatusCode, body: &serde_json::Value) -> &Self {
        self.push_response(HttpResponse::new(status, body.to_string()))
    }

    /// Queue a response with an arbitrary body.
    pub fn respond_raw(&self, status: StatusCode, body: &str) -> &Self {
        self.push_response(HttpResponse::new(status, body))
    }

    /// Queue a JSON response carrying a `Request-Id` header.
    pub fn respond_json_with_request_id(
        &self,
        status: StatusCode,
        body: &serde_json::Value,
        request_id: &'static str,
    ) -> &Self {
        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .insert(REQUEST_ID_HEADER, HeaderValue::from_static(request_id));
        self.push_response(response)
    }

    /// Queue a transport failure.
    pub fn fail(&self, error: TransportError) -> &Self {
        self.state().responses.push_back(Err(error));
        self
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Number of queued outcomes not yet consumed.
    pub fn pending(&self) -> usize {
        self.state().responses.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::other("no response queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, Method};

    fn request(path: &str) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: format!("https://api.stripe.com{}", path),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn replays_responses_in_order() {
        let mock = MockTransport::new();
        mock.respond_raw(StatusCode::OK, "first")
            .respond_raw(StatusCode::CREATED, "second");

        let first = mock.execute(request("/a")).await.unwrap();
        let second = mock.execute(request("/b")).await.unwrap();

        assert_eq!(first.body, b"first");
        assert_eq!(second.status, StatusCode::CREATED);
        assert_eq!(mock.pending(), 0);
    }

    #[tokio::test]
    async fn records_requests() {
        let mock = MockTransport::new();
        mock.respond_raw(StatusCode::OK, "{}");

        mock.execute(request("/v1/customers")).await.unwrap();

        assert_eq!(mock.request_count(), 1);
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.stripe.com/v1/customers"
        );
    }

    #[tokio::test]
    async fn empty_queue_is_a_transport_error() {
        let mock = MockTransport::new();
        let result = mock.execute(request("/v1/customers")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn queued_failure_is_returned() {
        let mock = MockTransport::new();
        mock.fail(TransportError::timeout("slow"));

        let err = mock.execute(request("/x")).await.unwrap_err();

        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        mock.respond_raw(StatusCode::OK, "{}");

        clone.execute(request("/x")).await.unwrap();

        assert_eq!(mock.request_count(), 1);
    }
}
