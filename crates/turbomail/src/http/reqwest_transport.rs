//! Default transport implementation over `reqwest`.

use super::transport::{
    HttpTransport, RequestBody, TransportError, TransportRequest, TransportResponse,
    TransportResult,
};
use async_trait::async_trait;
use std::time::Duration;

/// Transport backed by a shared `reqwest` client.
///
/// This is what a [`Client`](crate::Client) uses unless another transport
/// is injected. The request timeout lives here; the dispatcher imposes no
/// deadline of its own. There is no retry loop: one [`send`] call is one
/// network exchange, and failures propagate immediately.
///
/// [`send`]: HttpTransport::send
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self { http })
    }

    /// Wrap an already-configured `reqwest` client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse> {
        let mut req = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Raw {
                content_type,
                bytes,
            } => req
                .header(http::header::CONTENT_TYPE, content_type)
                .body(bytes),
            RequestBody::Multipart(form) => req.multipart(form),
        };

        let response = req.send().await.map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        tracing::debug!(status, bytes = body.len(), "transport exchange complete");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Http(err.to_string())
    }
}
