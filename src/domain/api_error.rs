//! Structured error body returned by Stripe on non-2xx responses.
//!
//! ```json
//! {
//!   "error": {
//!     "type": "card_error",
//!     "code": "card_declined",
//!     "decline_code": "insufficient_funds",
//!     "message": "Your card has insufficient funds.",
//!     "param": "source",
//!     "doc_url": "https://stripe.com/docs/error-codes/card-declined"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Category of a Stripe API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    /// Stripe-side failure.
    ApiError,
    /// The card could not be charged.
    CardError,
    /// Idempotency key reused with different parameters.
    IdempotencyError,
    /// Invalid parameters.
    InvalidRequestError,
    /// Any type this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApiErrorType::ApiError => "api_error",
            ApiErrorType::CardError => "card_error",
            ApiErrorType::IdempotencyError => "idempotency_error",
            ApiErrorType::InvalidRequestError => "invalid_request_error",
            ApiErrorType::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Envelope wrapping the error object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details from the Stripe API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiError {
    /// Error category.
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,

    /// Short machine-readable code (e.g. `card_declined`, `resource_missing`).
    pub code: Option<String>,

    /// Issuer decline reason for card errors.
    pub decline_code: Option<String>,

    /// Human-readable message.
    pub message: Option<String>,

    /// Parameter the error relates to.
    pub param: Option<String>,

    /// Link to documentation for the code.
    pub doc_url: Option<String>,

    /// Charge ID for card errors.
    pub charge: Option<String>,

    /// Dashboard link to the failed request.
    pub request_log_url: Option<String>,
}

impl ApiError {
    pub fn is_card_error(&self) -> bool {
        self.error_type == ApiErrorType::CardError
    }

    /// True when the referenced object does not exist.
    pub fn is_resource_missing(&self) -> bool {
        self.code.as_deref() == Some("resource_missing")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}
