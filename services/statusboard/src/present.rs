//! Presentation layer: view models pushed to an injected render target

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::Summary;
use crate::endpoint::{Endpoint, EndpointStatus};

/// How a response time compares to the latency thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseClass {
    /// Under 200 ms
    Fast,
    /// Under 500 ms
    Slow,
    Critical,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRow {
    pub name: String,
    pub url: String,
    pub expected_status: u16,
    pub status: EndpointStatus,
    pub response_time: String,
    pub response_class: Option<ResponseClass>,
    pub last_checked: String,
}

impl EndpointRow {
    pub fn new(endpoint: &Endpoint, now: DateTime<Utc>) -> Self {
        let (response_time, response_class) = format_response_time(endpoint.response_time);
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            expected_status: endpoint.expected_status,
            status: endpoint.current_status,
            response_time,
            response_class,
            last_checked: format_time_ago(endpoint.last_checked, now),
        }
    }
}

/// The four stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCards {
    pub operational: usize,
    pub down: usize,
    pub total: usize,
    pub average_response_ms: u64,
}

impl StatCards {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            operational: summary.counts.operational,
            down: summary.counts.down,
            total: summary.counts.total(),
            average_response_ms: summary.average_response_time.round() as u64,
        }
    }
}

/// Line chart data: sample times and rounded response times
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Doughnut chart data in the fixed status order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionChart {
    pub values: [usize; 4],
    pub percentages: [f64; 4],
}

impl DistributionChart {
    pub fn labels(&self) -> [&'static str; 4] {
        EndpointStatus::ALL.map(|s| s.label())
    }
}

/// Both charts. Created once per presenter, then only their data changes.
#[derive(Debug, Default)]
pub struct Charts {
    pub trend: TrendChart,
    pub distribution: DistributionChart,
    updates: u64,
}

impl Charts {
    /// Number of data replacements since creation
    pub fn updates(&self) -> u64 {
        self.updates
    }

    fn replace_data(&mut self, summary: &Summary) {
        self.trend.labels.clear();
        self.trend.values.clear();
        for point in &summary.trend {
            self.trend
                .labels
                .push(point.timestamp.format("%H:%M:%S").to_string());
            self.trend.values.push(point.response_time.round() as u64);
        }

        for (i, slice) in summary.distribution.iter().enumerate() {
            self.distribution.values[i] = slice.count;
            self.distribution.percentages[i] = slice.percentage;
        }

        self.updates += 1;
    }
}

/// Surface the presenter draws onto
pub trait RenderTarget: Send + Sync {
    fn render_table(&self, rows: &[EndpointRow]);

    fn render_stats(&self, stats: &StatCards);

    fn render_charts(&self, charts: &Charts);
}

/// Turns endpoint lists into view models for a render target
pub struct Presenter {
    target: Arc<dyn RenderTarget>,
    charts: Charts,
}

impl Presenter {
    pub fn new(target: Arc<dyn RenderTarget>) -> Self {
        Self {
            target,
            charts: Charts::default(),
        }
    }

    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    /// Render the table, stat cards and charts for `endpoints`
    pub fn render(&mut self, endpoints: &[Endpoint], now: DateTime<Utc>) {
        let rows: Vec<EndpointRow> = endpoints.iter().map(|e| EndpointRow::new(e, now)).collect();
        let summary = Summary::from_endpoints(endpoints);
        let stats = StatCards::from_summary(&summary);
        self.charts.replace_data(&summary);

        tracing::debug!(
            "Rendering {} rows ({} operational, {} down)",
            rows.len(),
            stats.operational,
            stats.down
        );

        self.target.render_table(&rows);
        self.target.render_stats(&stats);
        self.target.render_charts(&self.charts);
    }
}

/// `N/A` for a missing time, else rounded milliseconds with a class
pub fn format_response_time(response_time: Option<f64>) -> (String, Option<ResponseClass>) {
    match response_time {
        None => ("N/A".to_string(), None),
        Some(t) => {
            let ms = t.round();
            let class = if ms < 200.0 {
                ResponseClass::Fast
            } else if ms < 500.0 {
                ResponseClass::Slow
            } else {
                ResponseClass::Critical
            };
            (format!("{} ms", ms as i64), Some(class))
        }
    }
}

/// Relative description of when an endpoint was last checked
pub fn format_time_ago(last_checked: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last_checked else {
        return "Never".to_string();
    };
    let seconds = (now - last).num_seconds();

    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else {
        last.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Plain-text render target writing to stdout
#[derive(Debug, Default)]
pub struct TerminalTarget;

impl RenderTarget for TerminalTarget {
    fn render_table(&self, rows: &[EndpointRow]) {
        print!("{}", table_text(rows));
    }

    fn render_stats(&self, stats: &StatCards) {
        println!("{}", stats_text(stats));
    }

    fn render_charts(&self, charts: &Charts) {
        print!("{}", charts_text(charts));
    }
}

pub fn table_text(rows: &[EndpointRow]) -> String {
    if rows.is_empty() {
        return "No endpoints configured\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<40} {:>8} {:<12} {:>10} {:<20}",
        "NAME", "URL", "EXPECTED", "STATUS", "RESPONSE", "LAST CHECKED"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<40} {:>8} {:<12} {:>10} {:<20}",
            truncate(&row.name, 20),
            truncate(&row.url, 40),
            row.expected_status,
            row.status,
            row.response_time,
            row.last_checked
        );
    }
    out
}

pub fn stats_text(stats: &StatCards) -> String {
    format!(
        "Operational: {}  Down: {}  Total: {}  Avg response: {}ms",
        stats.operational, stats.down, stats.total, stats.average_response_ms
    )
}

pub fn charts_text(charts: &Charts) -> String {
    let mut out = String::new();
    if charts.trend.values.is_empty() {
        let _ = writeln!(out, "Response time: no samples");
    } else {
        let _ = writeln!(
            out,
            "Response time ({} .. {}): {}",
            charts.trend.labels.first().map(String::as_str).unwrap_or(""),
            charts.trend.labels.last().map(String::as_str).unwrap_or(""),
            sparkline(&charts.trend.values)
        );
    }

    let legend: Vec<String> = charts
        .distribution
        .labels()
        .iter()
        .zip(charts.distribution.values.iter())
        .zip(charts.distribution.percentages.iter())
        .map(|((label, value), pct)| format!("{}: {} ({:.1}%)", label, value, pct))
        .collect();
    let _ = writeln!(out, "{}", legend.join("  "));
    out
}

fn sparkline(values: &[u64]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    let span = (max - min).max(1);

    values
        .iter()
        .map(|v| BARS[((v - min) * (BARS.len() as u64 - 1) / span) as usize])
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
