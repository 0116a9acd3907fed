//! `/v1/billing_portal/sessions`

use crate::application::client::StripeClient;
use crate::application::error::StripeError;
use crate::application::request::{ApiRequest, RequestOptions};
use crate::domain::form::FormParams;
use crate::domain::resources::PortalSession;

/// Customer portal routes.
pub struct BillingPortalSessions<'a> {
    client: &'a StripeClient,
    options: RequestOptions,
}

impl<'a> BillingPortalSessions<'a> {
    pub(crate) fn new(client: &'a StripeClient) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// `POST /v1/billing_portal/sessions`
    pub async fn create(&self, params: &CreatePortalSession) -> Result<PortalSession, StripeError> {
        let request = ApiRequest::post("billing_portal/sessions")
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }
}

/// Parameters for opening the customer portal.
#[derive(Debug, Clone)]
pub struct CreatePortalSession {
    pub customer: String,
    /// Where the portal's back link points.
    pub return_url: Option<String>,
    /// Portal configuration to use instead of the default.
    pub configuration: Option<String>,
    pub locale: Option<String>,
}

impl CreatePortalSession {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            return_url: None,
            configuration: None,
            locale: None,
        }
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert("customer", self.customer.as_str())
            .insert_opt("return_url", self.return_url.as_deref())
            .insert_opt("configuration", self.configuration.as_deref())
            .insert_opt("locale", self.locale.as_deref());
        params
    }
}
