//! Stripe Event object, as delivered to webhooks and returned by `/v1/events`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::expandable::StripeObject;

/// Event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Always "event".
    #[serde(default)]
    pub object: String,

    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: EventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render `data`.
    pub api_version: Option<String>,

    /// Number of webhooks still pending delivery.
    #[serde(default)]
    pub pending_webhooks: i64,

    /// Request that triggered the event, if any.
    pub request: Option<EventRequest>,

    /// Connected account the event belongs to.
    pub account: Option<String>,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventData {
    /// The object affected by this event.
    pub object: serde_json::Value,

    /// Previous values of changed fields (on `*.updated` events).
    pub previous_attributes: Option<serde_json::Value>,
}

/// Request context for events triggered by API calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventRequest {
    pub id: Option<String>,
    pub idempotency_key: Option<String>,
}

impl Event {
    /// Decodes `data.object` as a concrete resource.
    pub fn data_object<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }

    /// The `object` tag of `data.object` (e.g. "customer", "invoice").
    pub fn data_object_kind(&self) -> Option<&str> {
        self.data.object.get("object").and_then(|v| v.as_str())
    }

    /// Customer referenced by the event's object.
    ///
    /// Customer events carry the customer itself; most other objects have a
    /// `customer` field holding an ID or an expanded customer.
    pub fn customer_id(&self) -> Option<&str> {
        if self.data_object_kind() == Some("customer") {
            return self.data.object.get("id").and_then(|v| v.as_str());
        }
        match self.data.object.get("customer")? {
            serde_json::Value::String(id) => Some(id.as_str()),
            other => other.get("id").and_then(|v| v.as_str()),
        }
    }

    pub fn is_live(&self) -> bool {
        self.livemode
    }
}

impl StripeObject for Event {
    const OBJECT: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }
}
