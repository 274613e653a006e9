//! Messages API endpoint

use super::Resource;
use crate::{
    client::Client, error::Result, multipart::AttachedFiles, params::ParamList,
    response::ApiResponse,
};

/// Messages API resource.
///
/// Sends email through a sending domain.
///
/// # Example
///
/// ```rust,no_run
/// # use turbomail::{AttachedFiles, Client, ParamList};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("key-...");
///
/// let response = client.messages()
///     .send(
///         "mail.example.com",
///         ParamList::new()
///             .add("from", "Sender <sender@mail.example.com>")
///             .add_all("to", ["a@example.com", "b@example.com"])
///             .add("subject", "Hello")
///             .add("text", "Sent from Rust"),
///         AttachedFiles::new().attachment("/tmp/report.pdf"),
///     )
///     .await?;
///
/// println!("{:?}", response.json());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Messages {
    client: Client,
}

impl Messages {
    /// Create a new Messages resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Send a message through the given sending domain.
    ///
    /// `data` carries the message fields (`from`, `to`, `subject`,
    /// `text`, `html`, ...); a repeated field becomes one multipart part
    /// per value. `files` carries the optional `message`, `attachment`,
    /// and `inline` groups.
    pub async fn send(
        &self,
        domain: &str,
        data: ParamList,
        files: AttachedFiles,
    ) -> Result<ApiResponse> {
        self.client
            .post(&format!("{domain}/messages"), data, files)
            .await
    }
}

impl Resource for Messages {
    fn client(&self) -> &Client {
        &self.client
    }
}
