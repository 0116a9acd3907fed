//! Customer object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::payment_source::{BankAccount, Card};
use crate::domain::expandable::{DynamicExpandable, StripeObject};

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Customer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Object type (always "customer").
    #[serde(default)]
    pub object: String,

    /// Balance in minor units applied to the next invoice.
    #[serde(default)]
    pub balance: i64,

    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,

    /// Default currency for recurring charges.
    pub currency: Option<String>,

    /// Default payment source, a card or a bank account.
    #[serde(default)]
    pub default_source: DynamicExpandable<Card, BankAccount>,

    /// Whether the latest charge or invoice failed.
    pub delinquent: Option<bool>,

    pub description: Option<String>,

    /// Customer email address.
    pub email: Option<String>,

    /// Customer name.
    pub name: Option<String>,

    pub phone: Option<String>,

    pub invoice_prefix: Option<String>,

    #[serde(default)]
    pub livemode: bool,

    /// Custom metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Whether the customer has been deleted.
    #[serde(default)]
    pub deleted: bool,
}

impl StripeObject for Customer {
    const OBJECT: &'static str = "customer";

    fn id(&self) -> &str {
        &self.id
    }
}
