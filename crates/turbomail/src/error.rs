//! Error types for the turbomail SDK
//!
//! One typed outcome per HTTP failure class, plus the ambient variants a
//! client needs (URL construction, serialization, I/O). All outcomes are
//! terminal to the call that produced them; callers see exactly one kind
//! and decide policy themselves.

use crate::http::TransportError;
use thiserror::Error;

/// Result type alias for operations that can fail with a turbomail error.
pub type Result<T> = std::result::Result<T, Error>;

/// Fixed text for 400 classifications; the server's detail is appended
/// when the body carries one.
pub(crate) const MISSING_PARAMETERS_TEXT: &str = "Missing required parameters.";

/// Fixed text for 404 classifications; the server's detail is appended
/// when the body carries one.
pub(crate) const MISSING_ENDPOINT_TEXT: &str = "Requested endpoint is missing.";

/// Main error type for the turbomail SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// API rejected the request with HTTP 400.
    #[error("{0}")]
    MissingRequiredParameters(String),

    /// API rejected the credentials with HTTP 401.
    #[error("Invalid credentials; check the supplied API key")]
    InvalidCredentials,

    /// API answered HTTP 404 for the requested path.
    #[error("{0}")]
    MissingEndpoint(String),

    /// Any other non-200 status, carrying the raw body for inspection.
    #[error("Unexpected HTTP response (status {status})")]
    GenericHttp {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network-level failure before any HTTP status existed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid URL provided or constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request rejected before dispatch.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Classify a non-200 HTTP response into the error taxonomy.
    ///
    /// For 400 and 404 the fixed text gains the server's `message` field
    /// when the body parses as JSON and carries one. 401 never leaks body
    /// detail. Everything else, success-like codes included, keeps the
    /// raw body verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            400 => Error::MissingRequiredParameters(with_server_message(
                MISSING_PARAMETERS_TEXT,
                body,
            )),
            401 => Error::InvalidCredentials,
            404 => Error::MissingEndpoint(with_server_message(MISSING_ENDPOINT_TEXT, body)),
            _ => Error::GenericHttp {
                status,
                body: body.to_string(),
            },
        }
    }
}

/// Append the JSON `message` field to the fixed text when the body has
/// one; otherwise the fixed text stands alone.
fn with_server_message(fixed: &str, body: &str) -> String {
    match serde_json::from_str::<ServerMessage>(body) {
        Ok(ServerMessage {
            message: Some(message),
        }) => format!("{fixed} {message}"),
        _ => fixed.to_string(),
    }
}

#[derive(serde::Deserialize)]
struct ServerMessage {
    message: Option<String>,
}
