//! Subscription, its items, and the prices they bill.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::customer::Customer;
use super::invoice::Invoice;
use crate::domain::expandable::{Expandable, StripeObject};
use crate::domain::list::List;

/// Stripe subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    IncompleteExpired,
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
    Paused,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Whether the customer should currently have access to what they pay for.
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing | SubscriptionStatus::PastDue
        )
    }

    /// Terminal states that cannot transition back to active.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Canceled | SubscriptionStatus::IncompleteExpired
        )
    }
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    /// Owning customer.
    #[serde(default)]
    pub customer: Expandable<Customer>,

    /// Current status.
    pub status: SubscriptionStatus,

    /// Start of the current billing period (Unix timestamp).
    #[serde(default)]
    pub current_period_start: i64,

    /// End of the current billing period (Unix timestamp).
    #[serde(default)]
    pub current_period_end: i64,

    /// Whether the subscription cancels at period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,

    pub canceled_at: Option<i64>,

    pub ended_at: Option<i64>,

    pub trial_end: Option<i64>,

    #[serde(default)]
    pub created: i64,

    /// Most recent invoice generated for this subscription.
    #[serde(default)]
    pub latest_invoice: Expandable<Invoice>,

    /// Subscription line items.
    #[serde(default)]
    pub items: List<SubscriptionItem>,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Subscription {
    /// Price ID of the first item, which for single-plan subscriptions is the plan.
    pub fn primary_price_id(&self) -> Option<&str> {
        self.items.data.first().map(|item| item.price.id.as_str())
    }
}

impl StripeObject for Subscription {
    const OBJECT: &'static str = "subscription";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Subscription item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionItem {
    /// Item ID (si_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    /// Price being billed.
    pub price: Price,

    pub quantity: Option<u64>,

    pub subscription: Option<String>,

    #[serde(default)]
    pub created: i64,
}

impl StripeObject for SubscriptionItem {
    const OBJECT: &'static str = "subscription_item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Price object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Price {
    /// Price ID (price_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub active: bool,

    /// Three-letter ISO currency code.
    #[serde(default)]
    pub currency: String,

    /// Amount in minor units.
    pub unit_amount: Option<i64>,

    /// Product this price belongs to.
    #[serde(default)]
    pub product: Expandable<Product>,

    /// Billing cadence for recurring prices.
    pub recurring: Option<Recurring>,

    pub nickname: Option<String>,

    /// Lookup key for fetching prices dynamically.
    pub lookup_key: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeObject for Price {
    const OBJECT: &'static str = "price";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Recurring component of a price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recurring {
    /// day, week, month or year.
    pub interval: String,

    #[serde(default = "default_interval_count")]
    pub interval_count: u32,
}

fn default_interval_count() -> u32 {
    1
}

/// Product object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Product {
    /// Product ID (prod_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub active: bool,

    pub description: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeObject for Product {
    const OBJECT: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }
}
