//! Application layer - the request dispatcher and the route facades built on it.

pub mod client;
pub mod error;
pub mod request;
pub mod routes;

pub use client::{decode_response, StripeClient};
pub use error::StripeError;
pub use request::{ApiRequest, RequestOptions};
