//! `/v1/events`

use crate::application::client::StripeClient;
use crate::application::error::StripeError;
use crate::application::request::{ApiRequest, RequestOptions};
use crate::domain::form::FormParams;
use crate::domain::list::{List, ListParams};
use crate::domain::resources::Event;

/// Event routes. Events are read-only.
pub struct Events<'a> {
    client: &'a StripeClient,
    options: RequestOptions,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a StripeClient) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// `GET /v1/events/{id}`
    pub async fn retrieve(&self, id: &str) -> Result<Event, StripeError> {
        let request =
            ApiRequest::get(format!("events/{}", id)).with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/events`
    pub async fn list(&self, params: &ListEvents) -> Result<List<Event>, StripeError> {
        let request = ApiRequest::get("events")
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }
}

/// Filters for listing events.
#[derive(Debug, Clone, Default)]
pub struct ListEvents {
    /// Single event type; `*` wildcards allowed (`invoice.*`).
    pub event_type: Option<String>,
    /// Several exact event types. Mutually exclusive with `event_type`.
    pub types: Vec<String>,
    pub page: ListParams,
}

impl ListEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page(mut self, page: ListParams) -> Self {
        self.page = page;
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = self.page.to_params();
        params.insert_opt("type", self.event_type.as_deref());
        if !self.types.is_empty() {
            params.insert("types", self.types.clone());
        }
        params
    }
}
