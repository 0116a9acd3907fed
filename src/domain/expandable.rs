//! Expandable references.
//!
//! Stripe returns many reference fields either as a bare ID or, when the
//! caller asked for `expand[]=field`, as the full embedded object:
//!
//! ```text
//! "customer": "cus_123"
//! "customer": { "id": "cus_123", "object": "customer", "email": "..." }
//! ```
//!
//! [`Expandable`] decodes either shape and always exposes the ID.
//! [`DynamicExpandable`] covers fields that can resolve to one of two object
//! kinds (for example a customer's default source being a card or a bank
//! account). Both serialize back to the bare ID only, since write endpoints
//! never accept embedded objects.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Stripe API object with its own identifier.
pub trait StripeObject {
    /// Value of the `object` field for this type (e.g. `"customer"`).
    const OBJECT: &'static str;

    /// The object's ID.
    fn id(&self) -> &str;
}

/// A field holding an ID, the expanded object, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expandable<T> {
    /// Unexpanded reference.
    Id(String),
    /// Expanded object.
    Object(Box<T>),
    /// Field was null or absent.
    Empty,
}

impl<T> Default for Expandable<T> {
    fn default() -> Self {
        Expandable::Empty
    }
}

impl<T: StripeObject> Expandable<T> {
    /// The referenced ID, whether or not the field was expanded.
    pub fn id(&self) -> Option<&str> {
        match self {
            Expandable::Id(id) => Some(id),
            Expandable::Object(object) => Some(object.id()),
            Expandable::Empty => None,
        }
    }
}

impl<T> Expandable<T> {
    /// The expanded object, if present.
    pub fn object(&self) -> Option<&T> {
        match self {
            Expandable::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Consumes the reference, returning the expanded object if present.
    pub fn into_object(self) -> Option<T> {
        match self {
            Expandable::Object(object) => Some(*object),
            _ => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Expandable::Object(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Expandable::Empty)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Expandable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(Expandable::Empty),
            Some(Value::String(id)) => Ok(Expandable::Id(id)),
            Some(value @ Value::Object(_)) => serde_json::from_value::<T>(value)
                .map(|object| Expandable::Object(Box::new(object)))
                .map_err(D::Error::custom),
            Some(other) => Err(D::Error::custom(format!(
                "expected an ID string or an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<T: StripeObject> Serialize for Expandable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.id() {
            Some(id) => serializer.serialize_str(id),
            None => serializer.serialize_none(),
        }
    }
}

/// A field that can expand to one of two object kinds.
///
/// Decoding tries `A`, then `B`. If neither fits but the object carries an
/// `id`, the ID is kept so callers can still refer to it.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicExpandable<A, B> {
    /// Unexpanded reference, or an expanded object of neither known kind.
    Id(String),
    /// Expanded as the first kind.
    First(Box<A>),
    /// Expanded as the second kind.
    Second(Box<B>),
    /// Field was null or absent.
    Empty,
}

impl<A, B> Default for DynamicExpandable<A, B> {
    fn default() -> Self {
        DynamicExpandable::Empty
    }
}

impl<A: StripeObject, B: StripeObject> DynamicExpandable<A, B> {
    /// The referenced ID regardless of expansion.
    pub fn id(&self) -> Option<&str> {
        match self {
            DynamicExpandable::Id(id) => Some(id),
            DynamicExpandable::First(a) => Some(a.id()),
            DynamicExpandable::Second(b) => Some(b.id()),
            DynamicExpandable::Empty => None,
        }
    }
}

impl<A, B> DynamicExpandable<A, B> {
    pub fn first(&self) -> Option<&A> {
        match self {
            DynamicExpandable::First(a) => Some(a),
            _ => None,
        }
    }

    pub fn second(&self) -> Option<&B> {
        match self {
            DynamicExpandable::Second(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(
            self,
            DynamicExpandable::First(_) | DynamicExpandable::Second(_)
        )
    }
}

impl<'de, A: DeserializeOwned, B: DeserializeOwned> Deserialize<'de> for DynamicExpandable<A, B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(DynamicExpandable::Empty),
            Some(Value::String(id)) => Ok(DynamicExpandable::Id(id)),
            Some(value @ Value::Object(_)) => {
                if let Ok(a) = serde_json::from_value::<A>(value.clone()) {
                    return Ok(DynamicExpandable::First(Box::new(a)));
                }
                if let Ok(b) = serde_json::from_value::<B>(value.clone()) {
                    return Ok(DynamicExpandable::Second(Box::new(b)));
                }
                value
                    .get("id")
                    .and_then(Value::as_str)
                    .map(|id| DynamicExpandable::Id(id.to_string()))
                    .ok_or_else(|| D::Error::custom("expanded object has no recognizable shape or id"))
            }
            Some(other) => Err(D::Error::custom(format!(
                "expected an ID string or an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<A: StripeObject, B: StripeObject> Serialize for DynamicExpandable<A, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.id() {
            Some(id) => serializer.serialize_str(id),
            None => serializer.serialize_none(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
