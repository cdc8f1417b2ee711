//! BDD test world for statusboard

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cucumber::World;
use serde_json::{json, Value};

use statusboard::config::Config;
use statusboard::endpoint::CheckResult;
use statusboard::io::{HttpClient, HttpResponse};
use statusboard::notifier::{NoticeBoard, NoticeLevel};
use statusboard::present::{Charts, EndpointRow, RenderTarget, StatCards};
use statusboard::refresh::AutoRefresh;
use statusboard::{Statusboard, StatusboardError};

/// Scripted stand-in for the status backend
#[derive(Debug)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

#[derive(Debug)]
struct BackendState {
    endpoints: Vec<Value>,
    reachable: bool,
    check_status: u16,
    list_requests: usize,
    check_requests: Vec<Value>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            state: Mutex::new(BackendState {
                endpoints: Vec::new(),
                reachable: true,
                check_status: 200,
                list_requests: 0,
                check_requests: Vec::new(),
            }),
        }
    }
}

impl FakeBackend {
    pub fn add_endpoints(&self, count: usize, status: &str) {
        let mut state = self.state.lock().unwrap();
        for _ in 0..count {
            let id = state.endpoints.len() + 1;
            state.endpoints.push(json!({
                "id": id,
                "url": format!("https://service{}.test/health", id),
                "name": format!("Service {}", id),
                "current_status": status,
                "response_time": 120.0,
            }));
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.state.lock().unwrap().reachable = reachable;
    }

    pub fn set_check_status(&self, status: u16) {
        self.state.lock().unwrap().check_status = status;
    }

    pub fn check_requests(&self) -> Vec<Value> {
        self.state.lock().unwrap().check_requests.clone()
    }

    pub fn list_requests(&self) -> usize {
        self.state.lock().unwrap().list_requests
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get(&self, url: &str) -> statusboard::Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.list_requests += 1;
        if !state.reachable {
            return Err(StatusboardError::Network(format!(
                "GET {} failed: connection refused",
                url
            )));
        }
        Ok(HttpResponse {
            status: 200,
            body: json!({ "endpoints": state.endpoints }).to_string(),
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> statusboard::Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.check_requests.push(body.clone());
        if !state.reachable {
            return Err(StatusboardError::Network(format!(
                "POST {} failed: connection refused",
                url
            )));
        }
        if state.check_status != 200 {
            return Ok(HttpResponse {
                status: state.check_status,
                body: "Internal Server Error".to_string(),
            });
        }

        let results: Vec<Value> = body["endpoint_ids"]
            .as_array()
            .map(|ids| {
                ids.iter()
                    .map(|id| json!({ "id": id, "current_status": "Operational" }))
                    .collect()
            })
            .unwrap_or_default();
        Ok(HttpResponse {
            status: 200,
            body: json!({ "results": results }).to_string(),
        })
    }
}

/// Render target that remembers everything drawn on it
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub tables: Mutex<Vec<Vec<EndpointRow>>>,
    pub stats: Mutex<Vec<StatCards>>,
    pub chart_updates: Mutex<Vec<u64>>,
}

impl RecordingTarget {
    pub fn render_count(&self) -> usize {
        self.tables.lock().unwrap().len()
    }

    pub fn last_stats(&self) -> Option<StatCards> {
        self.stats.lock().unwrap().last().copied()
    }

    pub fn last_table(&self) -> Option<Vec<EndpointRow>> {
        self.tables.lock().unwrap().last().cloned()
    }
}

impl RenderTarget for RecordingTarget {
    fn render_table(&self, rows: &[EndpointRow]) {
        self.tables.lock().unwrap().push(rows.to_vec());
    }

    fn render_stats(&self, stats: &StatCards) {
        self.stats.lock().unwrap().push(*stats);
    }

    fn render_charts(&self, charts: &Charts) {
        self.chart_updates.lock().unwrap().push(charts.updates());
    }
}

#[derive(Debug, Default, World)]
pub struct StatusboardWorld {
    pub backend: Arc<FakeBackend>,
    pub target: Arc<RecordingTarget>,
    pub statusboard: Option<Statusboard>,
    pub auto_refresh: Option<AutoRefresh>,
    pub check_results: Option<Vec<CheckResult>>,
    pub formatted: Option<String>,
}

impl StatusboardWorld {
    /// The dashboard wired to the fake backend, built on first use
    pub fn statusboard(&mut self) -> &Statusboard {
        let backend: Arc<dyn HttpClient> = self.backend.clone();
        let target: Arc<dyn RenderTarget> = self.target.clone();
        self.statusboard
            .get_or_insert_with(|| Statusboard::from_parts(Config::default(), backend, target))
    }

    pub async fn notice_messages(&mut self, level: NoticeLevel) -> Vec<String> {
        let board: Arc<NoticeBoard> = self.statusboard().notices().clone();
        board
            .history()
            .await
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}
