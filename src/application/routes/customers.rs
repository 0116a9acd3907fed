//! `/v1/customers`

use std::collections::BTreeMap;

use super::insert_metadata;
use crate::application::client::StripeClient;
use crate::application::error::StripeError;
use crate::application::request::{ApiRequest, RequestOptions};
use crate::domain::form::FormParams;
use crate::domain::list::{Deleted, List, ListParams, SearchResult};
use crate::domain::resources::Customer;

/// Customer routes.
pub struct Customers<'a> {
    client: &'a StripeClient,
    options: RequestOptions,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(client: &'a StripeClient) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    /// Applies `options` to every call made through this facade.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// `POST /v1/customers`
    pub async fn create(&self, params: &CreateCustomer) -> Result<Customer, StripeError> {
        let request = ApiRequest::post("customers")
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/customers/{id}`
    pub async fn retrieve(&self, id: &str, expand: &[String]) -> Result<Customer, StripeError> {
        let mut params = FormParams::new();
        params.expand(expand);
        let request = ApiRequest::get(format!("customers/{}", id))
            .query(&params)
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `POST /v1/customers/{id}`
    pub async fn update(&self, id: &str, params: &UpdateCustomer) -> Result<Customer, StripeError> {
        let request = ApiRequest::post(format!("customers/{}", id))
            .form(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `DELETE /v1/customers/{id}`
    pub async fn delete(&self, id: &str) -> Result<Deleted, StripeError> {
        let request =
            ApiRequest::delete(format!("customers/{}", id)).with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/customers`
    pub async fn list(&self, params: &ListCustomers) -> Result<List<Customer>, StripeError> {
        let request = ApiRequest::get("customers")
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }

    /// `GET /v1/customers/search`
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResult<Customer>, StripeError> {
        let request = ApiRequest::get("customers/search")
            .query(&params.to_params())
            .with_options(&self.options)?;
        self.client.send(request).await
    }
}

/// Parameters for creating a customer.
#[derive(Debug, Clone, Default)]
pub struct CreateCustomer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    /// Payment method to attach on creation.
    pub payment_method: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub expand: Vec<String>,
}

impl CreateCustomer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert_opt("email", self.email.as_deref())
            .insert_opt("name", self.name.as_deref())
            .insert_opt("description", self.description.as_deref())
            .insert_opt("phone", self.phone.as_deref())
            .insert_opt("payment_method", self.payment_method.as_deref())
            .expand(&self.expand);
        insert_metadata(&mut params, &self.metadata);
        params
    }
}

/// Parameters for updating a customer. Unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    /// Card or bank account ID to make the default source.
    pub default_source: Option<String>,
    pub invoice_prefix: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub expand: Vec<String>,
}

impl UpdateCustomer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = Some(source.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert_opt("email", self.email.as_deref())
            .insert_opt("name", self.name.as_deref())
            .insert_opt("description", self.description.as_deref())
            .insert_opt("phone", self.phone.as_deref())
            .insert_opt("default_source", self.default_source.as_deref())
            .insert_opt("invoice_prefix", self.invoice_prefix.as_deref())
            .expand(&self.expand);
        insert_metadata(&mut params, &self.metadata);
        params
    }
}

/// Filters for listing customers.
#[derive(Debug, Clone, Default)]
pub struct ListCustomers {
    /// Exact, case-sensitive email match.
    pub email: Option<String>,
    pub page: ListParams,
}

impl ListCustomers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_page(mut self, page: ListParams) -> Self {
        self.page = page;
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = self.page.to_params();
        params.insert_opt("email", self.email.as_deref());
        params
    }
}

/// Search query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Search query, e.g. `email:'jenny@example.com'`.
    pub query: String,
    pub limit: Option<u32>,
    /// `next_page` token from a previous result.
    pub page: Option<String>,
    pub expand: Vec<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn to_params(&self) -> FormParams {
        let mut params = FormParams::new();
        params
            .insert("query", self.query.as_str())
            .insert_opt("limit", self.limit)
            .insert_opt("page", self.page.as_deref())
            .expand(&self.expand);
        params
    }
}
