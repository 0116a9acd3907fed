//! Adapters - Implementations of port interfaces.
//!
//! - `transport` - `HttpTransport` over reqwest, plus a canned mock for tests

pub mod transport;

pub use transport::{MockTransport, ReqwestTransport};
