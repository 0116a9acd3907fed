//! HTTP transport port.
//!
//! The dispatcher never talks to the network itself. It builds an
//! [`HttpRequest`] and hands it to whatever [`HttpTransport`] the client was
//! constructed with, so tests can swap in a canned transport and embedders
//! can bring their own HTTP stack.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

/// Header carrying Stripe's per-request identifier.
pub const REQUEST_ID_HEADER: &str = "request-id";

/// Port for executing a single HTTP exchange.
///
/// Implementations perform exactly one attempt per call. Timeouts and
/// connection pooling are the implementation's concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Fully built outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL including any query string.
    pub url: String,

    pub headers: HeaderMap,

    /// Form-encoded body, if any.
    pub body: Option<String>,
}

/// Raw response as received from the wire.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Value of the `Request-Id` header, if present and valid UTF-8.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Classification of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Request did not complete in time.
    Timeout,
    /// Could not establish a connection.
    Connect,
    /// Anything else (TLS, body read, invalid request).
    Other,
}

/// Failure to complete the HTTP exchange. No response was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?} transport error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}
