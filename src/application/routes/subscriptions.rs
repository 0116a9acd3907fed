//! `/v1/subscriptions`

use std::collections::BTreeMap;

use super::{insert_metadata, nested};
use crate::application::client::StripeClient;
use crate::application::error::StripeError;
use crate::application::request::{ApiRequest, RequestOptions};
use crate::domain::form::{FormParams, FormValue};
use crate::domain::list::{List, ListParams};
use crate::domain::resources::Subscription;

/// Subscription routes.
pub struct Subscriptions<'a> {
    client: &'a StripeClient,
    options: RequestOptions,
}

impl<'a> Subscriptions<'a> {
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

    /// `POST /v1/subscriptions`
    pub async fn create(&self, params: &CreateSubscription) -> Result<Subscription, StripeError> {
        let request = ApiRequest::post("subscriptions")
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/subscriptions/{id}`
    pub async fn retrieve(&self, id: &str, expand: &[String]) -> Result<Subscription, StripeError> {
        let mut params = FormParams::new();
        params.expand(expand);
        let request = ApiRequest::get(format!("subscriptions/{}", id))
            .query(&params)
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `POST /v1/subscriptions/{id}`
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateSubscription,
    ) -> Result<Subscription, StripeError> {
        let request = ApiRequest::post(format!("subscriptions/{}", id))
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `DELETE /v1/subscriptions/{id}`
    ///
    /// Cancels immediately. To cancel at period end, `update` with
    /// `cancel_at_period_end` instead.
    pub async fn cancel(
        &self,
        id: &str,
        params: &CancelSubscription,
    ) -> Result<Subscription, StripeError> {
        let request = ApiRequest::delete(format!("subscriptions/{}", id))
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/subscriptions`
    pub async fn list(&self, params: &ListSubscriptions) -> Result<List<Subscription>, StripeError> {
        let request = ApiRequest::get("subscriptions")
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }
}

/// One line item on a subscription create or update.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionItemParams {
    /// Existing item ID (updates only).
    pub id: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<u32>,
    /// Remove the item (updates only).
    pub deleted: Option<bool>,
}

impl SubscriptionItemParams {
    pub fn price(price: impl Into<String>) -> Self {
        Self {
            price: Some(price.into()),
            ..Default::default()
        }
    }

    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn removed(mut self) -> Self {
        self.deleted = Some(true);
        self
    }

    fn to_value(&self) -> FormValue {
        nested([
            ("id", self.id.as_deref().map(FormValue::from)),
            ("price", self.price.as_deref().map(FormValue::from)),
            ("quantity", self.quantity.map(FormValue::from)),
            ("deleted", self.deleted.map(FormValue::from)),
        ])
    }
}

fn items_value(items: &[SubscriptionItemParams]) -> FormValue {
    FormValue::List(items.iter().map(SubscriptionItemParams::to_value).collect())
}

/// Parameters for creating a subscription.
#[derive(Debug, Clone, Default)]
pub struct CreateSubscription {
    pub customer: String,
    pub items: Vec<SubscriptionItemParams>,
    pub trial_period_days: Option<u32>,
    pub default_payment_method: Option<String>,
    pub cancel_at_period_end: Option<bool>,
    /// `default_incomplete`, `allow_incomplete`, `error_if_incomplete`, ...
    pub payment_behavior: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub expand: Vec<String>,
}

impl CreateSubscription {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            ..Default::default()
        }
    }

    pub fn with_item(mut self, item: SubscriptionItemParams) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_trial_period_days(mut self, days: u32) -> Self {
        self.trial_period_days = Some(days);
        self
    }

    pub fn with_payment_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.payment_behavior = Some(behavior.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert("customer", self.customer.as_str())
            .insert_opt("trial_period_days", self.trial_period_days)
            .insert_opt("default_payment_method", self.default_payment_method.as_deref())
            .insert_opt("cancel_at_period_end", self.cancel_at_period_end)
            .insert_opt("payment_behavior", self.payment_behavior.as_deref())
            .expand(&self.expand);
        if !self.items.is_empty() {
            params.insert("items", items_value(&self.items));
        }
        insert_metadata(&mut params, &self.metadata);
        params
    }
}

/// Parameters for updating a subscription.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscription {
    pub items: Vec<SubscriptionItemParams>,
    pub cancel_at_period_end: Option<bool>,
    /// `create_prorations`, `none` or `always_invoice`.
    pub proration_behavior: Option<String>,
    pub default_payment_method: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub expand: Vec<String>,
}

impl UpdateSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: SubscriptionItemParams) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_cancel_at_period_end(mut self, cancel: bool) -> Self {
        self.cancel_at_period_end = Some(cancel);
        self
    }

    pub fn with_proration_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.proration_behavior = Some(behavior.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert_opt("cancel_at_period_end", self.cancel_at_period_end)
            .insert_opt("proration_behavior", self.proration_behavior.as_deref())
            .insert_opt("default_payment_method", self.default_payment_method.as_deref())
            .expand(&self.expand);
        if !self.items.is_empty() {
            params.insert("items", items_value(&self.items));
        }
        insert_metadata(&mut params, &self.metadata);
        params
    }
}

/// Parameters for immediate cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelSubscription {
    /// Issue a final invoice for pending usage.
    pub invoice_now: Option<bool>,
    /// Prorate the final invoice.
    pub prorate: Option<bool>,
}

impl CancelSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert_opt("invoice_now", self.invoice_now)
            .insert_opt("prorate", self.prorate);
        params
    }
}

/// Filters for listing subscriptions.
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptions {
    pub customer: Option<String>,
    pub price: Option<String>,
    /// A status name, `all`, or `ended`.
    pub status: Option<String>,
    pub page: ListParams,
}

impl ListSubscriptions {
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

    pub fn with_page(mut self, page: ListParams) -> Self {
        self.page = page;
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = self.page.to_params();
        params
            .insert_opt("customer", self.customer.as_deref())
            .insert_opt("price", self.price.as_deref())
            .insert_opt("status", self.status.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use http::{Method, StatusCode};
    use serde_json::json;

    use crate::adapters::MockTransport;
    use crate::config::StripeConfig;
    use crate::domain::resources::SubscriptionStatus;

    fn client(transport: &MockTransport) -> StripeClient {
        StripeClient::new(StripeConfig::new("sk_test_123"), Arc::new(transport.clone())).unwrap()
    }

    fn subscription_json(status: &str) -> serde_json::Value {
        json!({
            "id": "sub_1",
            "object": "subscription",
            "customer": "cus_1",
            "status": status,
            "cancel_at_period_end": false
        })
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Parameter Encoding
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn create_params_encode_indexed_items() {
        let params = CreateSubscription::new("cus_1")
            .with_item(SubscriptionItemParams::price("price_monthly").with_quantity(2))
            .with_trial_period_days(14)
            .to_params();

        assert_eq!(
            params.encode(),
            "customer=cus_1\
             &items%5B0%5D%5Bprice%5D=price_monthly\
             &items%5B0%5D%5Bquantity%5D=2\
             &trial_period_days=14"
        );
    }

    #[test]
    fn update_params_can_swap_price_on_existing_item() {
        let params = UpdateSubscription::new()
            .with_item(SubscriptionItemParams::existing("si_1").with_price("price_annual"))
            .with_proration_behavior("create_prorations")
            .to_params();

        assert_eq!(
            params.encode(),
            "items%5B0%5D%5Bid%5D=si_1\
             &items%5B0%5D%5Bprice%5D=price_annual\
             &proration_behavior=create_prorations"
        );
    }

    #[test]
    fn removed_item_carries_deleted_flag() {
        let params = UpdateSubscription::new()
            .with_item(SubscriptionItemParams::existing("si_1").removed())
            .to_params();

        assert_eq!(
            params.encode(),
            "items%5B0%5D%5Bdeleted%5D=true&items%5B0%5D%5Bid%5D=si_1"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Routes
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_returns_subscription() {
        let transport = MockTransport::new();
        transport.respond_json(StatusCode::OK, &subscription_json("incomplete"));
        let client = client(&transport);

        let sub = client
            .subscriptions()
            .create(
                &CreateSubscription::new("cus_1")
                    .with_item(SubscriptionItemParams::price("price_monthly"))
                    .with_payment_behavior("default_incomplete")
                    .with_expand("latest_invoice"),
            )
            .await
            .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Incomplete);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.stripe.com/v1/subscriptions");
        assert!(sent
            .body
            .as_deref()
            .unwrap()
            .contains("expand%5B0%5D=latest_invoice"));
    }

    #[tokio::test]
    async fn update_schedules_cancellation() {
        let transport = MockTransport::new();
        transport.respond_json(StatusCode::OK, &subscription_json("active"));
        let client = client(&transport);

        client
            .subscriptions()
            .update("sub_1", &UpdateSubscription::new().with_cancel_at_period_end(true))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "https://api.stripe.com/v1/subscriptions/sub_1");
        assert_eq!(sent.body.as_deref(), Some("cancel_at_period_end=true"));
    }

    #[tokio::test]
    async fn cancel_uses_delete_with_query() {
        let transport = MockTransport::new();
        transport.respond_json(StatusCode::OK, &subscription_json("canceled"));
        let client = client(&transport);

        let sub = client
            .subscriptions()
            .cancel(
                "sub_1",
                &CancelSubscription {
                    invoice_now: Some(true),
                    prorate: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Canceled);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::DELETE);
        assert_eq!(
            sent.url,
            "https://api.stripe.com/v1/subscriptions/sub_1?invoice_now=true"
        );
    }

    #[tokio::test]
    async fn retrieve_and_list() {
        let transport = MockTransport::new();
        transport.respond_json(StatusCode::OK, &subscription_json("active"));
        transport.respond_json(
            StatusCode::OK,
            &json!({
                "object": "list",
                "data": [subscription_json("active")],
                "has_more": false,
                "url": "/v1/subscriptions"
            }),
        );
        let client = client(&transport);

        let sub = client.subscriptions().retrieve("sub_1", &[]).await.unwrap();
        let page = client
            .subscriptions()
            .list(&ListSubscriptions::new().for_customer("cus_1").with_status("all"))
            .await
            .unwrap();

        assert_eq!(sub.id, "sub_1");
        assert_eq!(page.data.len(), 1);
        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.stripe.com/v1/subscriptions/sub_1".to_string(),
                "https://api.stripe.com/v1/subscriptions?customer=cus_1&status=all".to_string(),
            ]
        );
    }
}
