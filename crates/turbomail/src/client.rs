//! Main client implementation for the Mailgun API

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use http::{HeaderMap, HeaderValue, Method, header};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{HttpTransport, RequestBody, ReqwestTransport, TransportRequest},
    multipart::{self, AttachedFiles, FilePart},
    params::ParamList,
    resources::{Events, Messages},
    response::ApiResponse,
};

/// Main client for the Mailgun API.
///
/// Holds the fixed endpoint configuration and credential, and dispatches
/// every call through the injected transport. Each logical operation is
/// exactly one HTTP exchange with a uniformly-typed result; nothing is
/// cached or mutated across calls.
///
/// # Example
///
/// ```rust,no_run
/// use turbomail::Client;
///
/// let client = Client::new("key-...");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

struct ClientInner {
    /// Transport performing the actual network I/O.
    transport: Arc<dyn HttpTransport>,

    /// Base URL, fixed at construction.
    base_url: Url,

    /// API key, paired with the fixed `api` username at send time.
    api_key: SecretString,

    // Lazy-initialized resources
    messages: OnceLock<Messages>,
    events: OnceLock<Events>,
}

/// Body shapes a dispatcher call may carry.
#[derive(Debug)]
pub enum Payload {
    /// No body.
    Empty,

    /// Field list sent as `application/x-www-form-urlencoded`.
    Form(ParamList),

    /// Field list sent as multipart/form-data even with no files, so the
    /// server parses every POST the same way.
    Multipart(ParamList),

    /// Pre-encoded bytes sent verbatim with the given content type.
    Raw {
        /// Value for the `Content-Type` header.
        content_type: &'static str,
        /// Encoded payload.
        bytes: Vec<u8>,
    },
}

impl Payload {
    /// Field list used when the body is folded into a multipart form.
    fn into_fields(self) -> ParamList {
        match self {
            Payload::Form(data) | Payload::Multipart(data) => data,
            Payload::Empty | Payload::Raw { .. } => ParamList::new(),
        }
    }
}

impl Client {
    /// Create a new client with an API key.
    ///
    /// # Panics
    ///
    /// This convenience method panics if the client cannot be built with
    /// the default configuration. For fallible construction use
    /// [`Client::try_new()`] instead.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder()
            .api_key(api_key)
            .build()
            .expect("Failed to build client with provided API key")
    }

    /// Create a new client with an API key (fallible version).
    pub fn try_new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder {
            config,
            transport: None,
        }
        .build()
    }

    /// Access the Messages API endpoint.
    pub fn messages(&self) -> &Messages {
        self.inner
            .messages
            .get_or_init(|| Messages::new(self.clone()))
    }

    /// Access the Events API endpoint.
    pub fn events(&self) -> &Events {
        self.inner.events.get_or_init(|| Events::new(self.clone()))
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// GET `path_suffix` with `query` serialized onto it; no body.
    pub async fn get(&self, path_suffix: &str, query: &ParamList) -> Result<ApiResponse> {
        let path = if query.is_empty() {
            path_suffix.to_string()
        } else {
            format!("{path_suffix}?{}", query.to_urlencoded())
        };

        self.send(Method::GET, &path, Payload::Empty, Vec::new(), HeaderMap::new())
            .await
    }

    /// POST `data` and `files` to `path_suffix` as multipart/form-data.
    ///
    /// POSTs are always multipart, files or not. Each pair in `data`
    /// becomes its own text part, so a repeated field (say several `to`
    /// recipients) arrives as separate part instances.
    pub async fn post(
        &self,
        path_suffix: &str,
        data: ParamList,
        files: AttachedFiles,
    ) -> Result<ApiResponse> {
        let files = files.open_all().await?;
        self.send(
            Method::POST,
            path_suffix,
            Payload::Multipart(data),
            files,
            HeaderMap::new(),
        )
        .await
    }

    /// PUT `data` to `path_suffix` as a form-urlencoded body.
    pub async fn put(&self, path_suffix: &str, data: ParamList) -> Result<ApiResponse> {
        self.send(
            Method::PUT,
            path_suffix,
            Payload::Form(data),
            Vec::new(),
            HeaderMap::new(),
        )
        .await
    }

    /// DELETE `path_suffix`; no body.
    pub async fn delete(&self, path_suffix: &str) -> Result<ApiResponse> {
        self.send(
            Method::DELETE,
            path_suffix,
            Payload::Empty,
            Vec::new(),
            HeaderMap::new(),
        )
        .await
    }

    /// Compose, authenticate, dispatch, and classify one API call.
    ///
    /// `path_suffix` is appended to the fixed base URL. The `User-Agent`
    /// and Basic `Authorization` headers are always injected. When
    /// `files` is non-empty the body is replaced by a multipart encoding
    /// of the payload's fields plus the file parts; otherwise the payload
    /// is sent as-is. Exactly one transport call is made, and the
    /// response classifies into an [`ApiResponse`] envelope or one of the
    /// error kinds in [`crate::Error`].
    pub async fn send(
        &self,
        method: Method,
        path_suffix: &str,
        body: Payload,
        files: Vec<FilePart>,
        extra_headers: HeaderMap,
    ) -> Result<ApiResponse> {
        if method != Method::GET
            && method != Method::POST
            && method != Method::PUT
            && method != Method::DELETE
        {
            return Err(Error::InvalidRequest(format!(
                "unsupported method: {method}"
            )));
        }

        let url = self.inner.base_url.join(path_suffix).map_err(|e| {
            Error::InvalidUrl(format!(
                "failed to construct URL from path '{path_suffix}': {e}"
            ))
        })?;

        let mut headers = extra_headers;
        headers.insert(header::USER_AGENT, HeaderValue::from_static(crate::USER_AGENT));
        headers.insert(header::AUTHORIZATION, self.authorization_header()?);

        let request_body = if files.is_empty() {
            match body {
                Payload::Empty => RequestBody::Empty,
                Payload::Form(data) => RequestBody::Raw {
                    content_type: "application/x-www-form-urlencoded",
                    bytes: data.to_urlencoded().into_bytes(),
                },
                Payload::Multipart(data) => {
                    RequestBody::Multipart(multipart::build_form(data, Vec::new()))
                }
                Payload::Raw {
                    content_type,
                    bytes,
                } => RequestBody::Raw {
                    content_type,
                    bytes,
                },
            }
        } else {
            RequestBody::Multipart(multipart::build_form(body.into_fields(), files))
        };

        tracing::debug!(method = %method, url = %url, "dispatching API request");

        let response = self
            .inner
            .transport
            .send(TransportRequest {
                method,
                url,
                headers,
                body: request_body,
            })
            .await?;

        tracing::debug!(status = response.status, "classifying API response");

        ApiResponse::from_transport(response)
    }

    /// Build the Basic credential from the fixed `api` username and the
    /// configured key.
    fn authorization_header(&self) -> Result<HeaderValue> {
        let credential = BASE64.encode(format!(
            "{}:{}",
            crate::AUTH_USER,
            self.inner.api_key.expose_secret()
        ));

        let mut value = HeaderValue::from_str(&format!("Basic {credential}"))
            .map_err(|_| Error::InvalidHeaderValue("authorization".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the API host (without scheme).
    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.config.api_host = Some(api_host.into());
        self
    }

    /// Set the API version segment of the base URL.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = Some(api_version.into());
        self
    }

    /// Choose HTTPS (default) or plain HTTP.
    pub fn tls(mut self, tls: bool) -> Self {
        self.config.tls = tls;
        self
    }

    /// Set the request timeout applied by the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Inject the transport performing network I/O.
    ///
    /// Defaults to a [`ReqwestTransport`] built with the configured
    /// timeout.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        let Self {
            mut config,
            transport,
        } = self;

        #[cfg(feature = "env")]
        if config.api_key.is_none()
            && let Ok(api_key) = std::env::var("MAILGUN_API_KEY")
        {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        let api_key = config.api_key.take().ok_or_else(|| {
            Error::MissingConfig(
                "no API key provided; set MAILGUN_API_KEY or pass one explicitly".to_string(),
            )
        })?;

        let base_url: Url = config
            .base_url()
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{e}")))?;

        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeout)?),
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                api_key,
                messages: OnceLock::new(),
                events: OnceLock::new(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{
        HttpTransport, TransportRequest, TransportResponse, TransportResult,
    };
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    /// Transport stub returning a canned response and recording every
    /// request it sees.
    #[derive(Debug)]
    struct StaticTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl StaticTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> std::sync::MutexGuard<'_, Vec<TransportRequest>> {
            self.seen.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for StaticTransport {
        async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(TransportResponse::new(
                self.status,
                HeaderMap::new(),
                self.body.as_bytes().to_vec(),
            ))
        }
    }

    fn client_with(transport: Arc<StaticTransport>) -> Client {
        Client::builder()
            .api_key("key-test")
            .transport(transport)
            .build()
            .expect("Failed to build client")
    }

    #[test]
    fn test_builder_requires_api_key() {
        temp_env::with_var_unset("MAILGUN_API_KEY", || {
            let result = Client::builder().build();
            assert_matches!(result, Err(Error::MissingConfig(_)));
        });
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_builder_falls_back_to_env_key() {
        temp_env::with_var("MAILGUN_API_KEY", Some("key-from-env"), || {
            let client = Client::builder().build().unwrap();
            let header = client.authorization_header().unwrap();
            let encoded = header.to_str().unwrap().strip_prefix("Basic ").unwrap();
            let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
            assert_eq!(decoded, "api:key-from-env");
        });
    }

    #[test]
    fn test_client_clone_shares_state() {
        let client1 = Client::new("key-test");
        let client2 = client1.clone();
        assert_eq!(client1.base_url(), client2.base_url());
    }

    #[test]
    fn test_resource_lazy_initialization() {
        let client = Client::new("key-test");

        let messages1 = client.messages();
        let messages2 = client.messages();
        assert!(std::ptr::eq(messages1, messages2));

        let events1 = client.events();
        let events2 = client.events();
        assert!(std::ptr::eq(events1, events2));
    }

    #[test]
    fn test_base_url_follows_tls_flag() {
        let client = Client::builder()
            .api_key("key-test")
            .tls(false)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://api.mailgun.net/v3/");

        let client = Client::new("key-test");
        assert_eq!(client.base_url(), "https://api.mailgun.net/v3/");
    }

    #[test]
    fn test_authorization_header_round_trips() {
        let client = Client::new("key-sekret");
        let header = client.authorization_header().unwrap();

        let encoded = header
            .to_str()
            .unwrap()
            .strip_prefix("Basic ")
            .unwrap()
            .to_string();
        let decoded = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        let (user, key) = decoded.split_once(':').unwrap();

        assert_eq!(user, crate::AUTH_USER);
        assert_eq!(key, "key-sekret");
    }

    #[tokio::test]
    async fn test_send_injects_fixed_headers() {
        let transport = StaticTransport::new(200, "{}");
        let client = client_with(transport.clone());

        client.get("domains", &ParamList::new()).await.unwrap();

        let seen = transport.requests();
        let request = &seen[0];
        assert_eq!(request.url.as_str(), "https://api.mailgun.net/v3/domains");
        assert_eq!(
            request.headers.get(header::USER_AGENT).unwrap(),
            crate::USER_AGENT
        );
        assert!(request.headers.contains_key(header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_get_appends_query_string() {
        let transport = StaticTransport::new(200, "{}");
        let client = client_with(transport.clone());

        client
            .get("x.example.com/events", &ParamList::new().add("limit", 10))
            .await
            .unwrap();

        let seen = transport.requests();
        assert_eq!(
            seen[0].url.as_str(),
            "https://api.mailgun.net/v3/x.example.com/events?limit=10"
        );
        assert_matches!(seen[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_post_is_always_multipart() {
        let transport = StaticTransport::new(200, "{}");
        let client = client_with(transport.clone());

        client
            .post(
                "x.example.com/messages",
                ParamList::new().add("from", "a@x.com"),
                AttachedFiles::new(),
            )
            .await
            .unwrap();

        let seen = transport.requests();
        assert_matches!(seen[0].body, RequestBody::Multipart(_));
    }

    #[tokio::test]
    async fn test_put_sends_urlencoded_body() {
        let transport = StaticTransport::new(200, "{}");
        let client = client_with(transport.clone());

        client
            .put("lists/dev@x.example.com", ParamList::new().add("name", "dev"))
            .await
            .unwrap();

        let seen = transport.requests();
        assert_matches!(
            &seen[0].body,
            RequestBody::Raw { content_type, bytes }
                if *content_type == "application/x-www-form-urlencoded"
                    && bytes == b"name=dev"
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_rejected() {
        let transport = StaticTransport::new(200, "{}");
        let client = client_with(transport.clone());

        let result = client
            .send(
                Method::PATCH,
                "domains",
                Payload::Empty,
                Vec::new(),
                HeaderMap::new(),
            )
            .await;

        assert_matches!(result, Err(Error::InvalidRequest(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_error_statuses_classify() {
        let transport = StaticTransport::new(401, "");
        let client = client_with(transport);

        let result = client.get("domains", &ParamList::new()).await;
        assert_matches!(result, Err(Error::InvalidCredentials));
    }
}
