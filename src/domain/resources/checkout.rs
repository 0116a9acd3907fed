//! Checkout Session object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::customer::Customer;
use super::subscription::Subscription;
use crate::domain::expandable::{Expandable, StripeObject};

/// Mode a Checkout Session runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    Payment,
    Setup,
    Subscription,
    #[serde(other)]
    Unknown,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Setup => "setup",
            CheckoutMode::Subscription => "subscription",
            CheckoutMode::Unknown => "unknown",
        }
    }
}

/// Stripe Checkout Session.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSession {
    /// Session ID (cs_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    pub mode: CheckoutMode,

    /// open, complete or expired.
    pub status: Option<String>,

    /// paid, unpaid or no_payment_required.
    #[serde(default)]
    pub payment_status: String,

    /// Hosted page URL; absent once the session is complete or expired.
    pub url: Option<String>,

    pub success_url: Option<String>,

    pub cancel_url: Option<String>,

    /// Customer created or reused by the session.
    #[serde(default)]
    pub customer: Expandable<Customer>,

    pub customer_email: Option<String>,

    /// Subscription created in `subscription` mode.
    #[serde(default)]
    pub subscription: Expandable<Subscription>,

    /// Reference passed through from session creation.
    pub client_reference_id: Option<String>,

    pub amount_total: Option<i64>,

    pub currency: Option<String>,

    /// Unix timestamp when the session expires.
    #[serde(default)]
    pub expires_at: i64,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

impl StripeObject for CheckoutSession {
    const OBJECT: &'static str = "checkout.session";

    fn id(&self) -> &str {
        &self.id
    }
}
