//! Statusboard - endpoint status dashboard
//!
//! Periodically asks a status backend to re-check its endpoints, then renders
//! a table, stat cards and charts from the refreshed endpoint list.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod io;
pub mod notifier;
pub mod present;
pub mod refresh;

pub use config::{load_config, Config};
pub use error::{Result, StatusboardError};

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::api::BackendClient;
use crate::dashboard::Dashboard;
use crate::endpoint::{CheckResult, Endpoint, NewEndpoint};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::NoticeBoard;
use crate::present::{RenderTarget, TerminalTarget};
use crate::refresh::{AutoRefresh, Visibility};

/// A configured dashboard ready to list, check or watch endpoints
#[derive(Debug)]
pub struct Statusboard {
    config: Config,
    dashboard: Arc<Dashboard>,
    notices: Arc<NoticeBoard>,
}

impl Statusboard {
    /// Build a dashboard that renders to the terminal
    pub fn new(config: Config) -> Result<Self> {
        Self::with_target(config, Arc::new(TerminalTarget))
    }

    /// Build a dashboard that renders to `target`
    pub fn with_target(config: Config, target: Arc<dyn RenderTarget>) -> Result<Self> {
        config.validate()?;
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
            config.backend.request_timeout(),
        )?);
        Ok(Self::from_parts(config, http, target))
    }

    /// Build from an explicit HTTP client
    pub fn from_parts(
        config: Config,
        http: Arc<dyn HttpClient>,
        target: Arc<dyn RenderTarget>,
    ) -> Self {
        let api = Arc::new(BackendClient::new(&config.backend.base_url, http));
        let notices = Arc::new(NoticeBoard::new(config.notices.history_size));
        let dashboard = Arc::new(Dashboard::new(api, notices.clone(), target));
        Self {
            config,
            dashboard,
            notices,
        }
    }

    pub fn dashboard(&self) -> &Arc<Dashboard> {
        &self.dashboard
    }

    pub fn notices(&self) -> &Arc<NoticeBoard> {
        &self.notices
    }

    /// Fetch and render once
    pub async fn list(&self) {
        self.dashboard.refresh().await;
    }

    /// Run one check cycle
    pub async fn check(&self) -> Vec<CheckResult> {
        self.dashboard.check_and_refresh().await
    }

    pub async fn add(&self, new_endpoint: &NewEndpoint) -> Result<Endpoint> {
        self.dashboard.add_endpoint(new_endpoint).await
    }

    /// Render once, then auto-refresh until `cancel` fires
    pub async fn watch(&self, cancel: CancellationToken) {
        self.dashboard.refresh().await;

        if !self.config.refresh.enabled {
            tracing::info!("Auto-refresh disabled");
            cancel.cancelled().await;
            return;
        }

        let target: Arc<dyn refresh::RefreshTarget> = self.dashboard.clone();
        let mut auto =
            AutoRefresh::new(target).with_default_interval(self.config.refresh.interval());
        auto.start_default();

        let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);
        spawn_visibility_signals(visibility_tx, cancel.clone());

        auto.follow_visibility(visibility_rx, cancel).await;
    }
}

/// Run the dashboard in watch mode until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let statusboard = Statusboard::new(config)?;
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    tracing::info!("Statusboard started");
    statusboard.watch(cancel).await;
    tracing::info!("Statusboard stopped");

    Ok(())
}

/// SIGUSR1 hides the dashboard (pausing refresh), SIGUSR2 shows it again
#[cfg(unix)]
fn spawn_visibility_signals(tx: watch::Sender<Visibility>, cancel: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut hide, mut show) = match (
            signal(SignalKind::user_defined1()),
            signal(SignalKind::user_defined2()),
        ) {
            (Ok(hide), Ok(show)) => (hide, show),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Visibility signals unavailable: {}", e);
                cancel.cancelled().await;
                return;
            }
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                Some(()) = hide.recv() => {
                    let _ = tx.send(Visibility::Hidden);
                }
                Some(()) = show.recv() => {
                    let _ = tx.send(Visibility::Visible);
                }
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_visibility_signals(tx: watch::Sender<Visibility>, _cancel: CancellationToken) {
    drop(tx);
}
