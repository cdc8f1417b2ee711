//! Transient user-facing notices

use std::collections::VecDeque;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Error => write!(f, "error"),
            NoticeLevel::Info => write!(f, "info"),
        }
    }
}

/// A notice shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp_epoch_ms: u64,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp_epoch_ms: current_epoch_ms(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }
}

/// Trait for surfacing notices. Implementations must not block the caller.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    async fn notify(&self, notice: Notice);
}

/// Notifier that logs every notice and keeps the most recent ones
#[derive(Debug)]
pub struct NoticeBoard {
    history: RwLock<VecDeque<Notice>>,
    history_max_size: usize,
}

impl NoticeBoard {
    pub fn new(history_max_size: usize) -> Self {
        Self {
            history: RwLock::new(VecDeque::with_capacity(history_max_size)),
            history_max_size,
        }
    }

    /// Snapshot of the retained notices, oldest first
    pub async fn history(&self) -> Vec<Notice> {
        self.history.read().await.iter().cloned().collect()
    }

    /// Number of retained notices at the given level
    pub async fn count(&self, level: NoticeLevel) -> usize {
        self.history
            .read()
            .await
            .iter()
            .filter(|n| n.level == level)
            .count()
    }
}

#[async_trait]
impl Notifier for NoticeBoard {
    async fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!("{}", notice.message),
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!("{}", notice.message),
        }

        if self.history_max_size == 0 {
            return;
        }
        let mut history = self.history.write().await;
        if history.len() >= self.history_max_size {
            history.pop_front();
        }
        history.push_back(notice);
    }
}

fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
