//! Ports - interfaces to the outside world.
//!
//! - `HttpTransport` - executes one HTTP exchange for the dispatcher

mod http_transport;

pub use http_transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
    REQUEST_ID_HEADER,
};
