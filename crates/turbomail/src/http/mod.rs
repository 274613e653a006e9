//! HTTP transport abstraction
//!
//! This module defines the contract between the request dispatcher and
//! the component performing actual network I/O, plus the default
//! `reqwest`-backed implementation.

pub use reqwest_transport::ReqwestTransport;
pub use transport::{
    HttpTransport, RequestBody, TransportError, TransportRequest, TransportResponse,
    TransportResult,
};

mod reqwest_transport;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
