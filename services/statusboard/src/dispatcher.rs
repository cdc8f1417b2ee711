//! Check dispatcher: one batched re-check for every known endpoint

use std::sync::Arc;

use crate::api::BackendClient;
use crate::endpoint::{CheckResult, EndpointId};
use crate::fetcher::StatusFetcher;
use crate::notifier::{Notice, Notifier};

/// Triggers a status re-check of all endpoints and awaits the results
#[derive(Debug, Clone)]
pub struct CheckDispatcher {
    api: Arc<BackendClient>,
    fetcher: StatusFetcher,
    notifier: Arc<dyn Notifier>,
}

impl CheckDispatcher {
    pub fn new(api: Arc<BackendClient>, fetcher: StatusFetcher, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            fetcher,
            notifier,
        }
    }

    /// Check every endpoint in a single request.
    ///
    /// An empty return means nothing was checked, either because there is
    /// nothing to check or because the check failed. Callers must not treat
    /// it as "all endpoints down".
    pub async fn check_all(&self) -> Vec<CheckResult> {
        let endpoints = self.fetcher.endpoints().await;

        if endpoints.is_empty() {
            self.notifier
                .notify(Notice::info("No endpoints to check"))
                .await;
            return Vec::new();
        }

        let ids: Vec<EndpointId> = endpoints.into_iter().map(|e| e.id).collect();
        tracing::debug!("Checking {} endpoints", ids.len());

        match self.api.check_status(&ids).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Error checking endpoints: {}", e);
                self.notifier
                    .notify(Notice::error("Failed to check endpoints"))
                    .await;
                Vec::new()
            }
        }
    }
}
