//! Stripe Gateway - a typed Stripe API client core.
//!
//! - form encoding of nested request parameters (`domain::form`)
//! - expandable references that decode from an ID or a full object
//!   (`domain::expandable`)
//! - webhook signature verification (`domain::webhook`)
//! - a request dispatcher over an injected HTTP transport
//!   (`application::client`) with per-resource route facades
//!
//! ```no_run
//! use stripe_gateway::{StripeClient, StripeConfig};
//! use stripe_gateway::application::routes::CreateCustomer;
//!
//! # async fn run() -> Result<(), stripe_gateway::StripeError> {
//! let client = StripeClient::from_config(StripeConfig::new("sk_test_..."))?;
//! let customer = client
//!     .customers()
//!     .create(&CreateCustomer::new().with_email("jenny@example.com"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{MockTransport, ReqwestTransport};
pub use application::{ApiRequest, RequestOptions, StripeClient, StripeError};
pub use config::{ConfigError, StripeConfig, ValidationError};
pub use domain::api_error::{ApiError, ApiErrorType};
pub use domain::expandable::{DynamicExpandable, Expandable, StripeObject};
pub use domain::form::{FormParams, FormValue};
pub use domain::list::{Deleted, List, ListParams, SearchResult};
pub use domain::webhook::{SignatureError, Webhook, WebhookError, WebhookVerifier};
pub use ports::{HttpRequest, HttpResponse, HttpTransport, TransportError};
