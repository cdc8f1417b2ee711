//! Summary statistics and chart series derived from the endpoint list
//!
//! Everything here is a pure function of the endpoints passed in.

use std::ops::Index;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, EndpointStatus};

/// Maximum number of samples kept in the response-time trend
pub const TREND_WINDOW: usize = 20;

/// Number of endpoints per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub operational: usize,
    pub down: usize,
    pub degraded: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.operational + self.down + self.degraded + self.unknown
    }

    fn increment(&mut self, status: EndpointStatus) {
        match status {
            EndpointStatus::Operational => self.operational += 1,
            EndpointStatus::Down => self.down += 1,
            EndpointStatus::Degraded => self.degraded += 1,
            EndpointStatus::Unknown => self.unknown += 1,
        }
    }
}

impl Index<EndpointStatus> for StatusCounts {
    type Output = usize;

    fn index(&self, status: EndpointStatus) -> &usize {
        match status {
            EndpointStatus::Operational => &self.operational,
            EndpointStatus::Down => &self.down,
            EndpointStatus::Degraded => &self.degraded,
            EndpointStatus::Unknown => &self.unknown,
        }
    }
}

/// One point of the response-time trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub response_time: f64,
}

/// One slice of the status distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub status: EndpointStatus,
    pub count: usize,
    pub percentage: f64,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: StatusCounts,
    pub average_response_time: f64,
    pub trend: Vec<TrendPoint>,
    pub distribution: [DistributionSlice; 4],
}

impl Summary {
    pub fn from_endpoints(endpoints: &[Endpoint]) -> Self {
        let counts = status_counts(endpoints);
        Self {
            counts,
            average_response_time: average_response_time(endpoints),
            trend: trend_series(endpoints),
            distribution: status_distribution(&counts),
        }
    }
}

/// Count endpoints by status. Values always sum to `endpoints.len()`.
pub fn status_counts(endpoints: &[Endpoint]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for endpoint in endpoints {
        counts.increment(endpoint.current_status);
    }
    counts
}

/// Mean of the non-null response times, or 0 when there are none
pub fn average_response_time(endpoints: &[Endpoint]) -> f64 {
    let (sum, count) = endpoints
        .iter()
        .filter_map(|e| e.response_time)
        .fold((0.0, 0usize), |(sum, count), t| (sum + t, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// All non-null history samples across endpoints, oldest first, limited to
/// the most recent [`TREND_WINDOW`] entries
pub fn trend_series(endpoints: &[Endpoint]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = endpoints
        .iter()
        .flat_map(|e| e.response_history.iter())
        .filter_map(|obs| {
            obs.response_time.map(|response_time| TrendPoint {
                timestamp: obs.timestamp,
                response_time,
            })
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);

    let skip = points.len().saturating_sub(TREND_WINDOW);
    points.drain(..skip);
    points
}

/// Counts in the fixed order Operational, Down, Degraded, Unknown
pub fn status_distribution(counts: &StatusCounts) -> [DistributionSlice; 4] {
    let total = counts.total();
    EndpointStatus::ALL.map(|status| {
        let count = counts[status];
        let percentage = if total > 0 {
            count as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        DistributionSlice {
            status,
            count,
            percentage,
        }
    })
}
