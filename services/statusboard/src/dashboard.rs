//! Dashboard: ties dispatcher, fetcher and presenter into one refresh cycle

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::api::BackendClient;
use crate::dispatcher::CheckDispatcher;
use crate::endpoint::{CheckResult, Endpoint, NewEndpoint};
use crate::fetcher::StatusFetcher;
use crate::notifier::{Notice, Notifier};
use crate::present::{Presenter, RenderTarget};
use crate::refresh::RefreshTarget;

/// Monotonic ticket source. A refresh may only render if no newer refresh
/// has rendered before it.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    issued: AtomicU64,
    rendered: AtomicU64,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next ticket
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim the right to render for `ticket`. False if a newer ticket already rendered.
    pub fn try_commit(&self, ticket: u64) -> bool {
        self.rendered.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

/// The endpoint dashboard
pub struct Dashboard {
    api: Arc<BackendClient>,
    fetcher: StatusFetcher,
    dispatcher: CheckDispatcher,
    notifier: Arc<dyn Notifier>,
    presenter: Mutex<Presenter>,
    sequence: SequenceGuard,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("api", &self.api)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl Dashboard {
    pub fn new(
        api: Arc<BackendClient>,
        notifier: Arc<dyn Notifier>,
        target: Arc<dyn RenderTarget>,
    ) -> Self {
        let fetcher = StatusFetcher::new(Arc::clone(&api), Arc::clone(&notifier));
        let dispatcher =
            CheckDispatcher::new(Arc::clone(&api), fetcher.clone(), Arc::clone(&notifier));
        Self {
            api,
            fetcher,
            dispatcher,
            notifier,
            presenter: Mutex::new(Presenter::new(target)),
            sequence: SequenceGuard::new(),
        }
    }

    /// Fetch the endpoint list and render it. A failed fetch renders the empty state.
    /// Returns false when a newer refresh rendered first and this one was dropped.
    pub async fn refresh(&self) -> bool {
        let (ticket, endpoints) = self.fetch_for_render().await;
        self.render(ticket, &endpoints)
    }

    /// One tick: batch check, then refresh only if the check produced results
    pub async fn check_and_refresh(&self) -> Vec<CheckResult> {
        let results = self.dispatcher.check_all().await;

        if results.is_empty() {
            tracing::debug!("Check returned no results, skipping refresh");
            return results;
        }

        self.refresh().await;
        results
    }

    /// Register a new endpoint and refresh the view
    pub async fn add_endpoint(&self, new_endpoint: &NewEndpoint) -> crate::Result<Endpoint> {
        match self.api.add_endpoint(new_endpoint).await {
            Ok(endpoint) => {
                self.notifier
                    .notify(Notice::success("Endpoint added successfully"))
                    .await;
                self.refresh().await;
                Ok(endpoint)
            }
            Err(e) => {
                tracing::warn!("Error adding endpoint: {}", e);
                let message = match &e {
                    crate::StatusboardError::Validation(msg)
                    | crate::StatusboardError::Backend { message: msg, .. } => msg.clone(),
                    _ => "Failed to add endpoint".to_string(),
                };
                self.notifier.notify(Notice::error(message)).await;
                Err(e)
            }
        }
    }

    /// Tickets are issued as the fetch is sent, so ticket order is request order
    async fn fetch_for_render(&self) -> (u64, Vec<Endpoint>) {
        let ticket = self.sequence.issue();
        (ticket, self.fetcher.endpoints().await)
    }

    fn render(&self, ticket: u64, endpoints: &[Endpoint]) -> bool {
        if !self.sequence.try_commit(ticket) {
            tracing::debug!("Discarding stale refresh #{}", ticket);
            return false;
        }
        self.presenter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(endpoints, Utc::now());
        true
    }
}

#[async_trait]
impl RefreshTarget for Dashboard {
    async fn tick(&self) {
        self.check_and_refresh().await;
    }
}
