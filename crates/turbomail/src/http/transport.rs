//! Transport contract between the dispatcher and the network layer.
//!
//! The dispatcher never performs I/O itself. It hands a fully-formed
//! request to an injected [`HttpTransport`] and classifies whatever comes
//! back. Anything implementing the trait can stand in for the network:
//! the default [`ReqwestTransport`](super::ReqwestTransport), a recording
//! stub in tests, or a custom backend.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::fmt;
use thiserror::Error;
use url::Url;

/// Result type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// A fully-formed HTTP request handed to the transport.
///
/// Authentication and identification headers are already present; the
/// transport only moves bytes.
#[derive(Debug)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,

    /// Absolute request URL.
    pub url: Url,

    /// Request headers, including `Authorization` and `User-Agent`.
    pub headers: HeaderMap,

    /// Request body.
    pub body: RequestBody,
}

/// Body shapes the dispatcher produces.
pub enum RequestBody {
    /// No body (GET, DELETE).
    Empty,

    /// Pre-encoded bytes with their content type.
    Raw {
        /// Value for the `Content-Type` header.
        content_type: &'static str,
        /// Encoded payload.
        bytes: Vec<u8>,
    },

    /// Multipart form; the transport generates the boundary and the
    /// matching `Content-Type` header.
    Multipart(reqwest::multipart::Form),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Raw { content_type, bytes } => f
                .debug_struct("Raw")
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
            Self::Multipart(_) => write!(f, "Multipart(..)"),
        }
    }
}

/// Response handed back by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers.
    pub headers: HeaderMap,

    /// Raw response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Response body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Errors raised below the HTTP status line.
///
/// These are failures where no HTTP response exists at all, as opposed to
/// the status-based outcomes in [`crate::error::Error`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport's own deadline elapsed.
    #[error("Request timed out")]
    Timeout,

    /// Any other HTTP-level failure (TLS, protocol, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The single capability the dispatcher requires from the network layer.
///
/// Implementations are injected at client construction and are otherwise
/// opaque to the request pipeline. One call to [`send`](Self::send) maps
/// to exactly one HTTP exchange; any timeout or cancellation policy lives
/// in the implementation.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Perform one HTTP exchange.
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text() {
        let response = TransportResponse::new(200, HeaderMap::new(), "hello".as_bytes().to_vec());
        assert_eq!(response.text(), "hello");
    }

    #[test]
    fn test_request_body_debug_hides_content() {
        let body = RequestBody::Raw {
            content_type: "application/x-www-form-urlencoded",
            bytes: b"password=secret".to_vec(),
        };
        let rendered = format!("{:?}", body);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("application/x-www-form-urlencoded"));
    }
}
