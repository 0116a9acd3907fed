//! Collection wrappers shared by every resource.

use serde::{Deserialize, Serialize};

use super::form::FormParams;

/// Page of objects returned by a list endpoint.
///
/// Shape: `{ "object": "list", "data": [...], "has_more": bool, "url": "/v1/..." }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct List<T> {
    /// Always "list".
    #[serde(default)]
    pub object: String,

    /// Objects on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Whether more objects exist after this page.
    #[serde(default)]
    pub has_more: bool,

    /// Endpoint URL for this list.
    #[serde(default)]
    pub url: String,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            object: "list".to_string(),
            data: Vec::new(),
            has_more: false,
            url: String::new(),
        }
    }
}

impl<T> List<T> {
    /// Cursor for the next page (`starting_after`), if there is one.
    pub fn next_cursor(&self) -> Option<&T> {
        if self.has_more {
            self.data.last()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Page of objects returned by a search endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult<T> {
    /// Always "search_result".
    #[serde(default)]
    pub object: String,

    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub url: String,

    /// Token for the following page.
    pub next_page: Option<String>,

    /// Total matches, only present when requested with `expand[]=total_count`.
    pub total_count: Option<u64>,
}

/// Response body of a DELETE call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Deleted {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

/// Cursor pagination parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page size, 1 to 100.
    pub limit: Option<u32>,

    /// Return objects after this ID.
    pub starting_after: Option<String>,

    /// Return objects before this ID.
    pub ending_before: Option<String>,

    /// Fields to expand on each returned object (`data.customer`, ...).
    pub expand: Vec<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    /// Writes the pagination keys into `params`.
    pub fn apply(&self, params: &mut FormParams) {
        params
            .insert_opt("limit", self.limit)
            .insert_opt("starting_after", self.starting_after.as_deref())
            .insert_opt("ending_before", self.ending_before.as_deref())
            .expand(&self.expand);
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        self.apply(&mut params);
        params
    }
}
