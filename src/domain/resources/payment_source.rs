//! Payment sources attached to a customer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::expandable::StripeObject;

/// Card object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Card {
    /// Card ID (card_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    /// Card brand (Visa, MasterCard, ...).
    pub brand: String,

    pub last4: String,

    pub exp_month: i64,

    pub exp_year: i64,

    /// credit, debit, prepaid or unknown.
    pub funding: Option<String>,

    /// Two-letter issuing country code.
    pub country: Option<String>,

    /// Owning customer ID.
    pub customer: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeObject for Card {
    const OBJECT: &'static str = "card";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Bank account object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BankAccount {
    /// Bank account ID (ba_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    pub bank_name: Option<String>,

    pub last4: String,

    /// Two-letter country code.
    pub country: String,

    /// Three-letter ISO currency code.
    pub currency: String,

    pub routing_number: Option<String>,

    /// new, validated, verified, verification_failed or errored.
    pub status: String,

    pub customer: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeObject for BankAccount {
    const OBJECT: &'static str = "bank_account";

    fn id(&self) -> &str {
        &self.id
    }
}
