//! `/v1/checkout/sessions`

use std::collections::BTreeMap;

use super::{insert_metadata, nested};
use crate::application::client::StripeClient;
use crate::application::error::StripeError;
use crate::application::request::{ApiRequest, RequestOptions};
use crate::domain::form::{FormParams, FormValue};
use crate::domain::list::{List, ListParams};
use crate::domain::resources::{CheckoutMode, CheckoutSession};

/// Checkout Session routes.
pub struct CheckoutSessions<'a> {
    client: &'a StripeClient,
    options: RequestOptions,
}

impl<'a> CheckoutSessions<'a> {
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

    /// `POST /v1/checkout/sessions`
    pub async fn create(
        &self,
        params: &CreateCheckoutSession,
    ) -> Result<CheckoutSession, StripeError> {
        let request = ApiRequest::post("checkout/sessions")
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/checkout/sessions/{id}`
    pub async fn retrieve(
        &self,
        id: &str,
        expand: &[String],
    ) -> Result<CheckoutSession, StripeError> {
        let mut params = FormParams::new();
        params.expand(expand);
        let request = ApiRequest::get(format!("checkout/sessions/{}", id))
            .query(&params)
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `POST /v1/checkout/sessions/{id}/expire`
    ///
    /// Only open sessions can be expired.
    pub async fn expire(&self, id: &str) -> Result<CheckoutSession, StripeError> {
        let request = ApiRequest::post(format!("checkout/sessions/{}/expire", id))
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/checkout/sessions`
    pub async fn list(
        &self,
        params: &ListCheckoutSessions,
    ) -> Result<List<CheckoutSession>, StripeError> {
        let request = ApiRequest::get("checkout/sessions")
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }
}

/// A price and quantity to sell in the session.
#[derive(Debug, Clone)]
pub struct CheckoutLineItem {
    pub price: String,
    pub quantity: u32,
}

impl CheckoutLineItem {
    pub fn new(price: impl Into<String>, quantity: u32) -> Self {
        Self {
            price: price.into(),
            quantity,
        }
    }

    fn to_value(&self) -> FormValue {
        nested([
            ("price", Some(FormValue::from(self.price.as_str()))),
            ("quantity", Some(FormValue::from(self.quantity))),
        ])
    }
}

/// Settings for the subscription created in `subscription` mode.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionData {
    pub trial_period_days: Option<u32>,
    pub metadata: BTreeMap<String, String>,
}

impl SubscriptionData {
    fn to_value(&self) -> FormValue {
        let metadata = (!self.metadata.is_empty()).then(|| FormValue::from(self.metadata.clone()));
        nested([
            ("trial_period_days", self.trial_period_days.map(FormValue::from)),
            ("metadata", metadata),
        ])
    }
}

/// Parameters for creating a Checkout Session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSession {
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: Option<String>,
    /// Existing customer to attach the session to.
    pub customer: Option<String>,
    /// Prefills the email field when no customer is given.
    pub customer_email: Option<String>,
    /// Reference echoed back on the completed session.
    pub client_reference_id: Option<String>,
    pub line_items: Vec<CheckoutLineItem>,
    pub allow_promotion_codes: Option<bool>,
    pub subscription_data: Option<SubscriptionData>,
    pub metadata: BTreeMap<String, String>,
    pub expand: Vec<String>,
}

impl CreateCheckoutSession {
    pub fn new(mode: CheckoutMode, success_url: impl Into<String>) -> Self {
        Self {
            mode,
            success_url: success_url.into(),
            cancel_url: None,
            customer: None,
            customer_email: None,
            client_reference_id: None,
            line_items: Vec::new(),
            allow_promotion_codes: None,
            subscription_data: None,
            metadata: BTreeMap::new(),
            expand: Vec::new(),
        }
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_client_reference_id(mut self, reference: impl Into<String>) -> Self {
        self.client_reference_id = Some(reference.into());
        self
    }

    pub fn with_line_item(mut self, item: CheckoutLineItem) -> Self {
        self.line_items.push(item);
        self
    }

    pub fn with_promotion_codes(mut self, allow: bool) -> Self {
        self.allow_promotion_codes = Some(allow);
        self
    }

    pub fn with_subscription_data(mut self, data: SubscriptionData) -> Self {
        self.subscription_data = Some(data);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert("mode", self.mode.as_str())
            .insert("success_url", self.success_url.as_str())
            .insert_opt("cancel_url", self.cancel_url.as_deref())
            .insert_opt("customer", self.customer.as_deref())
            .insert_opt("customer_email", self.customer_email.as_deref())
            .insert_opt("client_reference_id", self.client_reference_id.as_deref())
            .insert_opt("allow_promotion_codes", self.allow_promotion_codes)
            .expand(&self.expand);
        if !self.line_items.is_empty() {
            let items = self.line_items.iter().map(CheckoutLineItem::to_value).collect();
            params.insert("line_items", FormValue::List(items));
        }
        if let Some(data) = &self.subscription_data {
            let value = data.to_value();
            if !value.is_empty_container() {
                params.insert("subscription_data", value);
            }
        }
        insert_metadata(&mut params, &self.metadata);
        params
    }
}

/// Filters for listing Checkout Sessions.
#[derive(Debug, Clone, Default)]
pub struct ListCheckoutSessions {
    pub customer: Option<String>,
    pub subscription: Option<String>,
    /// `open`, `complete` or `expired`.
    pub status: Option<String>,
    pub page: ListParams,
}

impl ListCheckoutSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = self.page.to_params();
        params
            .insert_opt("customer", self.customer.as_deref())
            .insert_opt("subscription", self.subscription.as_deref())
            .insert_opt("status", self.status.as_deref());
        params
    }
}
