//! Configuration for the Mailgun client

use secrecy::SecretString;
use std::time::Duration;

/// Configuration for the Mailgun client.
///
/// Endpoint configuration and credential are fixed at client
/// construction; the base URL is computed once from host, version, and
/// the TLS flag and never recomputed afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for Basic authentication (paired with the fixed `api`
    /// username at send time).
    pub api_key: Option<SecretString>,

    /// API host, without scheme. Defaults to the public API host.
    pub api_host: Option<String>,

    /// API version segment of the base URL.
    pub api_version: Option<String>,

    /// Use HTTPS (true, default) or plain HTTP (false).
    pub tls: bool,

    /// Request timeout applied by the default transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: None,
            api_version: None,
            tls: true,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first, then:
    /// - `MAILGUN_API_KEY` for authentication
    /// - `MAILGUN_API_HOST` for the API host
    /// - `MAILGUN_API_VERSION` for the base URL version segment
    /// - `MAILGUN_TIMEOUT` for the request timeout (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        use std::env;

        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("MAILGUN_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(api_host) = env::var("MAILGUN_API_HOST") {
            config.api_host = Some(api_host);
        }

        if let Ok(api_version) = env::var("MAILGUN_API_VERSION") {
            config.api_version = Some(api_version);
        }

        if let Ok(timeout_str) = env::var("MAILGUN_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        config
    }

    /// Base URL string used for the life of the client:
    /// `(http|https)://{host}/{version}/`.
    pub(crate) fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        let host = self.api_host.as_deref().unwrap_or(crate::DEFAULT_API_HOST);
        let version = self
            .api_version
            .as_deref()
            .unwrap_or(crate::DEFAULT_API_VERSION);
        format!("{scheme}://{host}/{version}/")
    }
}
