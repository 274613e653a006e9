//! Events API endpoint

use super::Resource;
use crate::{client::Client, error::Result, params::ParamList, response::ApiResponse};

/// Events API resource.
///
/// Queries the event log (deliveries, opens, failures, ...) for a
/// sending domain.
#[derive(Clone)]
pub struct Events {
    client: Client,
}

impl Events {
    /// Create a new Events resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List events for the given domain.
    ///
    /// `query` maps straight onto the endpoint's filter parameters
    /// (`limit`, `begin`, `event`, ...).
    pub async fn list(&self, domain: &str, query: &ParamList) -> Result<ApiResponse> {
        self.client.get(&format!("{domain}/events"), query).await
    }
}

impl Resource for Events {
    fn client(&self) -> &Client {
        &self.client
    }
}
