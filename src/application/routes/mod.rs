//! Resource route facades.
//!
//! Each facade borrows the client, carries the [`RequestOptions`] for the
//! calls made through it, and maps one method to one dispatcher call.
//!
//! ```ignore
//! let customer = client
//!     .customers()
//!     .with_options(RequestOptions::new().with_generated_idempotency_key())
//!     .create(&CreateCustomer::new().with_email("jenny@example.com"))
//!     .await?;
//! ```
//!
//! [`RequestOptions`]: super::request::RequestOptions

mod billing_portal;
mod checkout_sessions;
mod customers;
mod events;
mod subscriptions;

pub use billing_portal::{BillingPortalSessions, CreatePortalSession};
pub use checkout_sessions::{
    CheckoutLineItem, CheckoutSessions, CreateCheckoutSession, ListCheckoutSessions,
    SubscriptionData,
};
pub use customers::{CreateCustomer, Customers, ListCustomers, SearchParams, UpdateCustomer};
pub use events::{Events, ListEvents};
pub use subscriptions::{
    CancelSubscription, CreateSubscription, ListSubscriptions, SubscriptionItemParams,
    Subscriptions, UpdateSubscription,
};

use std::collections::BTreeMap;

use crate::domain::form::{FormParams, FormValue};

/// Inserts `metadata[key]=value` entries; an empty map adds nothing.
fn insert_metadata(params: &mut FormParams, metadata: &BTreeMap<String, String>) {
    if !metadata.is_empty() {
        params.insert("metadata", metadata.clone());
    }
}

/// Builds a nested map value from `(key, value)` pairs, skipping `None`s.
fn nested<I>(entries: I) -> FormValue
where
    I: IntoIterator<Item = (&'static str, Option<FormValue>)>,
{
    FormValue::Map(
        entries
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .collect(),
    )
}
