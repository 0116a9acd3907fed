//! Form encoding for Stripe request bodies and query strings.
//!
//! Stripe accepts `application/x-www-form-urlencoded` parameters with bracket
//! notation for nesting:
//!
//! ```text
//! metadata[user_id]=usr_123&items[0][price]=price_abc&items[0][quantity]=1
//! ```
//!
//! Parameters are built as a [`FormParams`] map of [`FormValue`]s and flattened
//! by [`encode`]. Absent optional fields are never encoded; use
//! [`FormParams::insert_opt`] to skip `None` values.

use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain string.
    Str(String),
    /// Integer (amounts in minor units, timestamps, counts).
    Int(i64),
    /// Boolean, encoded as `true` / `false`.
    Bool(bool),
    /// Sequence, encoded as `key[0]=…&key[1]=…`.
    List(Vec<FormValue>),
    /// Nested map, encoded as `key[child]=…`.
    Map(BTreeMap<String, FormValue>),
}

impl FormValue {
    /// Returns true for a list or map with no entries.
    ///
    /// Empty containers produce no output when encoded.
    pub fn is_empty_container(&self) -> bool {
        match self {
            FormValue::List(items) => items.is_empty(),
            FormValue::Map(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Str(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Str(value)
    }
}

impl From<&String> for FormValue {
    fn from(value: &String) -> Self {
        FormValue::Str(value.clone())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Int(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl<T: Into<FormValue>> From<Vec<T>> for FormValue {
    fn from(values: Vec<T>) -> Self {
        FormValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<FormValue>> From<BTreeMap<String, V>> for FormValue {
    fn from(map: BTreeMap<String, V>) -> Self {
        FormValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<FormParams> for FormValue {
    fn from(params: FormParams) -> Self {
        FormValue::Map(params.0)
    }
}

/// Top-level parameter map for one request.
///
/// Keys are kept sorted so the encoded output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams(BTreeMap<String, FormValue>);

impl FormParams {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts the value only when present.
    pub fn insert_opt<V: Into<FormValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(key.into(), value.into());
        }
        self
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds `expand[]` entries for the given field paths.
    ///
    /// An empty slice leaves the map untouched.
    pub fn expand(&mut self, fields: &[String]) -> &mut Self {
        if !fields.is_empty() {
            self.insert("expand", fields.to_vec());
        }
        self
    }

    /// Gets the value for a key.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    /// Returns true when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens and percent-encodes the parameters.
    pub fn encode(&self) -> String {
        encode(self)
    }
}

impl FromIterator<(String, FormValue)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (String, FormValue)>>(iter: I) -> Self {
        FormParams(iter.into_iter().collect())
    }
}

/// Flattens `params` into bracket-notation pairs and form-encodes them.
///
/// Returns an empty string for an empty map.
pub fn encode(params: &FormParams) -> String {
    let pairs = flatten(params);
    if pairs.is_empty() {
        return String::new();
    }
    // A sequence of string pairs has no unsupported shapes, so this cannot fail.
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

/// Flattens `params` into `(key, value)` pairs without percent-encoding.
pub fn flatten(params: &FormParams) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in &params.0 {
        flatten_value(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_value(prefix: String, value: &FormValue, out: &mut Vec<(String, String)>) {
    match value {
        FormValue::Str(s) => out.push((prefix, s.clone())),
        FormValue::Int(i) => out.push((prefix, i.to_string())),
        FormValue::Bool(b) => out.push((prefix, b.to_string())),
        FormValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{}[{}]", prefix, index), item, out);
            }
        }
        FormValue::Map(map) => {
            for (key, item) in map {
                flatten_value(format!("{}[{}]", prefix, key), item, out);
            }
        }
    }
}
