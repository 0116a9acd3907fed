//! Billing portal session.

use serde::{Deserialize, Serialize};

use crate::domain::expandable::StripeObject;

/// Customer portal session. Its `url` is short-lived and single-use.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalSession {
    /// Session ID (bps_...).
    pub id: String,

    #[serde(default)]
    pub object: String,

    /// Customer the portal is opened for.
    pub customer: String,

    /// Portal URL to redirect the customer to.
    pub url: String,

    pub return_url: Option<String>,

    /// Portal configuration ID.
    pub configuration: Option<String>,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub livemode: bool,
}

impl StripeObject for PortalSession {
    const OBJECT: &'static str = "billing_portal.session";

    fn id(&self) -> &str {
        &self.id
    }
}
