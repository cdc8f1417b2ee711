//! Auto-refresh loop: a cancellable periodic tick

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Interval used when none is given and when resuming after being hidden
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Shorter intervals are raised to this
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Work performed on every tick
#[async_trait]
pub trait RefreshTarget: Send + Sync {
    async fn tick(&self);
}

/// Whether the surface showing the dashboard can currently be seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// A running timer. Dropping the handle cancels the timer; a tick already in
/// progress is allowed to finish.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl RefreshHandle {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancel the timer
    pub fn stop(self) {
        tracing::debug!("Stopping auto-refresh timer");
        drop(self);
    }

    /// Cancel the timer and wait for the loop task to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn a loop that calls `target.tick()` every `interval`, first after one interval
pub fn spawn_refresh(target: Arc<dyn RefreshTarget>, interval: Duration) -> RefreshHandle {
    let interval = if interval < MIN_INTERVAL {
        tracing::warn!(
            "Refresh interval {:?} is too short, using {:?}",
            interval,
            MIN_INTERVAL
        );
        MIN_INTERVAL
    } else {
        interval
    };

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        refresh_loop(target, interval, loop_cancel).await;
    });

    RefreshHandle {
        cancel,
        task: Some(task),
        interval,
    }
}

async fn refresh_loop(target: Arc<dyn RefreshTarget>, interval: Duration, cancel: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Auto-refresh loop cancelled");
                break;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        tracing::debug!("Auto-refresh: checking endpoints");
        target.tick().await;
    }
}

/// State of the auto-refresh loop
#[derive(Debug)]
pub enum LoopState {
    Stopped,
    Running(RefreshHandle),
}

/// Owner of the single auto-refresh timer
pub struct AutoRefresh {
    target: Arc<dyn RefreshTarget>,
    default_interval: Duration,
    state: LoopState,
}

impl std::fmt::Debug for AutoRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoRefresh")
            .field("default_interval", &self.default_interval)
            .field("state", &self.state)
            .finish()
    }
}

impl AutoRefresh {
    pub fn new(target: Arc<dyn RefreshTarget>) -> Self {
        Self {
            target,
            default_interval: DEFAULT_INTERVAL,
            state: LoopState::Stopped,
        }
    }

    /// Interval used by [`AutoRefresh::start_default`] and when becoming visible
    pub fn with_default_interval(mut self, interval: Duration) -> Self {
        self.default_interval = interval;
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Interval of the running timer, if any
    pub fn interval(&self) -> Option<Duration> {
        match &self.state {
            LoopState::Running(handle) => Some(handle.interval()),
            LoopState::Stopped => None,
        }
    }

    /// Start ticking every `interval`, replacing any running timer
    pub fn start(&mut self, interval: Duration) {
        self.stop();
        let handle = spawn_refresh(Arc::clone(&self.target), interval);
        tracing::info!(
            "Auto-refresh started: checking every {} seconds",
            handle.interval().as_secs()
        );
        self.state = LoopState::Running(handle);
    }

    pub fn start_default(&mut self) {
        self.start(self.default_interval);
    }

    /// Stop ticking. Does nothing when already stopped.
    pub fn stop(&mut self) {
        if let LoopState::Running(handle) = std::mem::replace(&mut self.state, LoopState::Stopped) {
            handle.stop();
            tracing::info!("Auto-refresh stopped");
        }
    }

    /// Stop while hidden, restart with the default interval once visible
    pub fn set_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Hidden => {
                self.stop();
                tracing::info!("Dashboard hidden: auto-refresh stopped");
            }
            Visibility::Visible => {
                self.start_default();
                tracing::info!("Dashboard visible: auto-refresh restarted");
            }
        }
    }

    /// Apply visibility changes from `visibility` until `cancel` fires or the
    /// sender goes away, then stop the timer
    pub async fn follow_visibility(
        mut self,
        mut visibility: watch::Receiver<Visibility>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = visibility.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Visibility source closed");
                        cancel.cancelled().await;
                        break;
                    }
                    let current = *visibility.borrow_and_update();
                    self.set_visibility(current);
                }
            }
        }
        self.stop();
    }
}
