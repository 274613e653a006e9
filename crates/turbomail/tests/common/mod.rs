//! Shared helpers for integration tests

use turbomail::Client;

/// API key used across the integration suite.
pub fn test_api_key() -> String {
    "key-test-0123456789abcdef".to_string()
}

/// Client pointed at a wiremock server URI (plain HTTP, default `v3`
/// version segment).
pub fn client_for(mock_uri: &str) -> Client {
    let host = mock_uri
        .strip_prefix("http://")
        .expect("mock server uri is plain http");

    Client::builder()
        .api_key(test_api_key())
        .api_host(host)
        .tls(false)
        .build()
        .expect("Failed to build client")
}

/// The exact `Authorization` value the client is expected to send.
pub fn expected_authorization() -> String {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    format!(
        "Basic {}",
        STANDARD.encode(format!("api:{}", test_api_key()))
    )
}
