//! Request descriptions handed to the dispatcher.

use std::str::FromStr;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};

use super::error::StripeError;
use crate::domain::form::FormParams;

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";
pub const STRIPE_ACCOUNT_HEADER: &str = "stripe-account";

/// One API call, relative to `{api_base}/v1/`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,

    /// Resource path without the version prefix, e.g. `customers/cus_123`.
    pub path: String,

    /// Encoded query string (no leading `?`).
    pub query: Option<String>,

    /// Encoded form body.
    pub body: Option<String>,

    /// Per-call headers; these override the client defaults.
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Encodes `params` as the query string. Empty params leave it unset.
    pub fn query(mut self, params: &FormParams) -> Self {
        self.query = (!params.is_empty()).then(|| params.encode());
        self
    }

    /// Encodes `params` as the form body. Empty params leave it unset.
    pub fn form(mut self, params: &FormParams) -> Self {
        self.body = (!params.is_empty()).then(|| params.encode());
        self
    }

    /// Applies per-call options on top of any headers already set.
    pub fn with_options(mut self, options: &RequestOptions) -> Result<Self, StripeError> {
        self.headers.extend(options.to_headers()?);
        Ok(self)
    }
}

/// Per-call settings layered over the client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as `Idempotency-Key`; makes POST retries safe.
    pub idempotency_key: Option<String>,

    /// Connected account to act as (`Stripe-Account`).
    pub stripe_account: Option<String>,

    /// Extra headers, applied last.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Uses a fresh UUID v4 as the idempotency key.
    pub fn with_generated_idempotency_key(self) -> Self {
        self.with_idempotency_key(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.idempotency_key.is_none() && self.stripe_account.is_none() && self.headers.is_empty()
    }

    /// Converts the options into header entries.
    ///
    /// # Errors
    ///
    /// `InvalidHeader` if a name or value is not a legal HTTP header.
    pub fn to_headers(&self) -> Result<HeaderMap, StripeError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &self.idempotency_key {
            headers.insert(
                HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
                header_value(key)?,
            );
        }
        if let Some(account) = &self.stripe_account {
            headers.insert(
                HeaderName::from_static(STRIPE_ACCOUNT_HEADER),
                header_value(account)?,
            );
        }
        for (name, value) in &self.headers {
            let name = HeaderName::from_str(name)
                .map_err(|_| StripeError::InvalidHeader(format!("invalid header name: {}", name)))?;
            headers.insert(name, header_value(value)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, StripeError> {
    HeaderValue::from_str(value)
        .map_err(|_| StripeError::InvalidHeader(format!("invalid header value: {:?}", value)))
}
