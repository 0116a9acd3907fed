//! Invoice object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::customer::Customer;
use super::subscription::Subscription;
use crate::domain::expandable::{Expandable, StripeObject};

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Uncollectible,
    Void,
    #[serde(other)]
    Unknown,
}

/// Stripe Invoice object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Invoice {
    /// Invoice ID (in_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub customer: Expandable<Customer>,

    #[serde(default)]
    pub subscription: Expandable<Subscription>,

    pub status: Option<InvoiceStatus>,

    /// Amount due in minor units.
    #[serde(default)]
    pub amount_due: i64,

    #[serde(default)]
    pub amount_paid: i64,

    #[serde(default)]
    pub amount_remaining: i64,

    #[serde(default)]
    pub currency: String,

    /// Number of payment attempts made.
    #[serde(default)]
    pub attempt_count: u32,

    /// Unix timestamp of the next automatic retry.
    pub next_payment_attempt: Option<i64>,

    /// Customer-facing payment page.
    pub hosted_invoice_url: Option<String>,

    pub invoice_pdf: Option<String>,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == Some(InvoiceStatus::Paid)
    }
}

impl StripeObject for Invoice {
    const OBJECT: &'static str = "invoice";

    fn id(&self) -> &str {
        &self.id
    }
}
