//! Stripe domain model: wire encodings, shared envelopes, and resources.

pub mod api_error;
pub mod expandable;
pub mod form;
pub mod list;
pub mod resources;
pub mod webhook;
