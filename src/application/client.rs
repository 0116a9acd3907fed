//! Request dispatcher.
//!
//! [`StripeClient`] owns the configuration, the default header set, and the
//! injected transport. Every API call goes through [`StripeClient::send`]:
//!
//! 1. merge default headers with the call's headers (call wins)
//! 2. execute exactly once through the transport
//! 3. decode the body as `T` on 2xx, or as a Stripe error otherwise

use std::sync::Arc;

use http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::HeaderMap;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use super::error::StripeError;
use super::request::ApiRequest;
use super::routes::{BillingPortalSessions, CheckoutSessions, Customers, Events, Subscriptions};
use crate::adapters::ReqwestTransport;
use crate::config::{ConfigError, StripeConfig, ValidationError};
use crate::domain::api_error::ApiErrorResponse;
use crate::ports::{HttpRequest, HttpResponse, HttpTransport};

const STRIPE_VERSION_HEADER: &str = "stripe-version";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Stripe API client.
///
/// Cheap to share behind an `Arc`; holds no mutable state.
pub struct StripeClient {
    config: StripeConfig,
    default_headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
}

impl StripeClient {
    /// Creates a client that sends through `transport`.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the configuration is invalid or cannot be
    /// expressed as headers.
    pub fn new(
        config: StripeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let default_headers = default_headers(&config)?;

        Ok(Self {
            config,
            default_headers,
            transport,
        })
    }

    /// Creates a client using [`ReqwestTransport`] with the configured timeout.
    pub fn from_config(config: StripeConfig) -> Result<Self, StripeError> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Self::new(config, Arc::new(transport))?)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Headers sent with every request unless the call overrides them.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    pub fn checkout_sessions(&self) -> CheckoutSessions<'_> {
        CheckoutSessions::new(self)
    }

    pub fn billing_portal_sessions(&self) -> BillingPortalSessions<'_> {
        BillingPortalSessions::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// Resolves `request` into a wire request: absolute URL plus merged headers.
    pub fn build_request(&self, request: ApiRequest) -> HttpRequest {
        let mut url = format!(
            "{}/v1/{}",
            self.config.api_base.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        if let Some(query) = &request.query {
            url.push('?');
            url.push_str(query);
        }

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);

        HttpRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
        }
    }

    /// Sends one request and decodes the response as `T`.
    ///
    /// # Errors
    ///
    /// - `Transport` - the exchange failed; nothing was decoded
    /// - `Api` - non-2xx status with a Stripe error body
    /// - `Decode` - the body matched neither `T` (on 2xx) nor the error shape
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, StripeError> {
        let method = request.method.clone();
        let path = request.path.clone();
        let http_request = self.build_request(request);

        tracing::debug!(method = %method, path = %path, "Dispatching Stripe request");

        let response = self.transport.execute(http_request).await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "Stripe transport failed");
            e
        })?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status.as_u16(),
            request_id = response.request_id().unwrap_or_default(),
            "Stripe response received"
        );

        decode_response(response)
    }
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.config.api_base)
            .field("api_version", &self.config.api_version)
            .finish_non_exhaustive()
    }
}

fn default_headers(config: &StripeConfig) -> Result<HeaderMap, ValidationError> {
    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {}", config.secret_key.expose_secret()))
            .map_err(|_| ValidationError::InvalidSecretKey)?;
    authorization.set_sensitive(true);

    let version = HeaderValue::from_str(&config.api_version)
        .map_err(|_| ValidationError::InvalidApiVersion)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(HeaderName::from_static(STRIPE_VERSION_HEADER), version);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    Ok(headers)
}

/// Maps a raw response to `T` or to the matching error.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, StripeError> {
    if response.status.is_success() {
        return Ok(serde_json::from_slice(&response.body)?);
    }

    let status = response.status.as_u16();
    let request_id = response.request_id().map(str::to_string);
    let body: ApiErrorResponse = serde_json::from_slice(&response.body).map_err(|e| {
        tracing::warn!(status, error = %e, "Stripe error response has an unexpected shape");
        e
    })?;

    tracing::warn!(
        status,
        request_id = request_id.as_deref().unwrap_or_default(),
        error_type = %body.error.error_type,
        code = body.error.code.as_deref().unwrap_or_default(),
        "Stripe API returned an error"
    );

    Err(StripeError::Api {
        status,
        request_id,
        error: body.error,
    })
}
