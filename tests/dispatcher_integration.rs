//! Integration tests for the request dispatcher and route facades.
//!
//! These tests drive the public API end to end:
//! 1. Facade builds an `ApiRequest` from typed parameters
//! 2. Client merges headers and hands the wire request to the transport
//! 3. Response is decoded into a resource or a typed error
//!
//! A hand-written transport stands in for the network, alongside the bundled
//! `MockTransport`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::{HeaderValue, StatusCode};
use serde_json::json;

use stripe_gateway::application::routes::{
    CreateCheckoutSession, CreateCustomer, CreateSubscription, SubscriptionItemParams,
};
use stripe_gateway::domain::resources::{CheckoutMode, Customer, SubscriptionStatus};
use stripe_gateway::{
    ApiErrorType, HttpRequest, HttpResponse, HttpTransport, ListParams, MockTransport,
    RequestOptions, StripeClient, StripeConfig, StripeError, TransportError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Routes responses by path and counts calls.
struct RoutingTransport {
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl RoutingTransport {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for RoutingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        let path = request
            .url
            .strip_prefix("https://api.stripe.com/v1/")
            .unwrap_or_default()
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();

        let (status, body) = match path.as_str() {
            "customers" => (
                StatusCode::OK,
                json!({
                    "id": "cus_int",
                    "object": "customer",
                    "email": "int@example.com",
                    "default_source": null
                }),
            ),
            "subscriptions" => (
                StatusCode::OK,
                json!({
                    "id": "sub_int",
                    "object": "subscription",
                    "customer": {"id": "cus_int", "object": "customer"},
                    "status": "active",
                    "latest_invoice": {
                        "id": "in_int",
                        "object": "invoice",
                        "status": "paid",
                        "amount_paid": 1999,
                        "currency": "usd"
                    }
                }),
            ),
            _ => (
                StatusCode::NOT_FOUND,
                json!({"error": {
                    "type": "invalid_request_error",
                    "message": format!("Unrecognized request URL (GET: /v1/{})", path)
                }}),
            ),
        };

        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .insert("request-id", HeaderValue::from_static("req_integration"));
        Ok(response)
    }
}

fn config() -> StripeConfig {
    StripeConfig::new("sk_test_integration")
}

// =============================================================================
// End-to-end Flows
// =============================================================================

#[tokio::test]
async fn customer_then_subscription_flow() {
    let transport = Arc::new(RoutingTransport::new());
    let client = StripeClient::new(config(), transport.clone()).unwrap();

    let customer = client
        .customers()
        .with_options(RequestOptions::new().with_generated_idempotency_key())
        .create(
            &CreateCustomer::new()
                .with_email("int@example.com")
                .with_metadata("user_id", "usr_int"),
        )
        .await
        .unwrap();

    let subscription = client
        .subscriptions()
        .create(
            &CreateSubscription::new(customer.id.as_str())
                .with_item(SubscriptionItemParams::price("price_monthly"))
                .with_expand("latest_invoice")
                .with_expand("customer"),
        )
        .await
        .unwrap();

    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.customer.id(), Some("cus_int"));
    assert!(subscription.customer.is_expanded());
    let invoice = subscription.latest_invoice.object().unwrap();
    assert!(invoice.is_paid());
    assert_eq!(invoice.amount_paid, 1999);

    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    let seen = transport.seen.lock().unwrap();
    assert!(seen[0].headers.contains_key("idempotency-key"));
    assert!(!seen[1].headers.contains_key("idempotency-key"));
    assert_eq!(
        seen[0].body.as_deref(),
        Some("email=int%40example.com&metadata%5Buser_id%5D=usr_int")
    );
}

#[tokio::test]
async fn unknown_route_yields_api_error_with_request_id() {
    let transport = Arc::new(RoutingTransport::new());
    let client = StripeClient::new(config(), transport).unwrap();

    let err = client
        .checkout_sessions()
        .create(&CreateCheckoutSession::new(
            CheckoutMode::Payment,
            "https://example.com/ok",
        ))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.request_id(), Some("req_integration"));
    assert_eq!(
        err.api_error().map(|e| e.error_type),
        Some(ApiErrorType::InvalidRequestError)
    );
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let transport = Arc::new(RoutingTransport::new());
    let client = Arc::new(StripeClient::new(config(), transport.clone()).unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.customers().create(&CreateCustomer::new()).await
        }));
    }
    for handle in handles {
        let customer: Customer = handle.await.unwrap().unwrap();
        assert_eq!(customer.id, "cus_int");
    }

    assert_eq!(transport.calls.load(Ordering::SeqCst), 8);
}

// =============================================================================
// MockTransport
// =============================================================================

#[tokio::test]
async fn paginates_with_cursor() {
    let transport = MockTransport::new();
    transport
        .respond_json(
            StatusCode::OK,
            &json!({
                "object": "list",
                "data": [{"id": "cus_1"}, {"id": "cus_2"}],
                "has_more": true,
                "url": "/v1/customers"
            }),
        )
        .respond_json(
            StatusCode::OK,
            &json!({
                "object": "list",
                "data": [{"id": "cus_3"}],
                "has_more": false,
                "url": "/v1/customers"
            }),
        );
    let client = StripeClient::new(config(), Arc::new(transport.clone())).unwrap();

    let mut ids = Vec::new();
    let mut page_params = ListParams::new().with_limit(2);
    loop {
        let page = client
            .customers()
            .list(&stripe_gateway::application::routes::ListCustomers::new()
                .with_page(page_params.clone()))
            .await
            .unwrap();
        ids.extend(page.data.iter().map(|c| c.id.clone()));
        match page.next_cursor() {
            Some(last) => page_params = page_params.clone().starting_after(last.id.as_str()),
            None => break,
        }
    }

    assert_eq!(ids, vec!["cus_1", "cus_2", "cus_3"]);
    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.stripe.com/v1/customers?limit=2".to_string(),
            "https://api.stripe.com/v1/customers?limit=2&starting_after=cus_2".to_string(),
        ]
    );
}

#[tokio::test]
async fn transport_failure_is_not_retried() {
    let transport = MockTransport::new();
    transport.fail(TransportError::connect("connection refused"));
    let client = StripeClient::new(config(), Arc::new(transport.clone())).unwrap();

    let err = client.events().retrieve("evt_1").await.unwrap_err();

    assert!(matches!(err, StripeError::Transport(_)));
    assert_eq!(transport.request_count(), 1);
}
