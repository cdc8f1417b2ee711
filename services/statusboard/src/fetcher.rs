//! Status fetcher: current endpoint list with a fail-soft variant

use std::sync::Arc;

use crate::api::BackendClient;
use crate::endpoint::Endpoint;
use crate::notifier::{Notice, Notifier};

/// Retrieves the monitored endpoints and their last-known status
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    api: Arc<BackendClient>,
    notifier: Arc<dyn Notifier>,
}

impl StatusFetcher {
    pub fn new(api: Arc<BackendClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Fetch endpoints, propagating any network failure
    pub async fn fetch_endpoints(&self) -> crate::Result<Vec<Endpoint>> {
        self.api.list_endpoints().await
    }

    /// Fetch endpoints; on failure notify and return an empty list
    pub async fn endpoints(&self) -> Vec<Endpoint> {
        match self.fetch_endpoints().await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                tracing::warn!("Error fetching endpoints: {}", e);
                self.notifier
                    .notify(Notice::error("Failed to fetch endpoints"))
                    .await;
                Vec::new()
            }
        }
    }
}
