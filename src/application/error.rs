//! Errors returned by the dispatcher and the route facades.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::api_error::ApiError;
use crate::ports::TransportError;

/// Failure of a single API call.
///
/// Nothing is retried; every variant describes the outcome of exactly one
/// exchange (or of building it).
#[derive(Debug, Error)]
pub enum StripeError {
    /// The exchange did not complete. No body was decoded.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Stripe answered with a non-2xx status and a structured error body.
    #[error("Stripe API error (HTTP {status}): {error}")]
    Api {
        status: u16,
        /// Value of the `Request-Id` response header.
        request_id: Option<String>,
        error: ApiError,
    },

    /// The body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A per-call header could not be encoded.
    #[error("invalid request header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StripeError {
    /// The vendor error, for `Api` failures.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StripeError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status, for `Api` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            StripeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            StripeError::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}
