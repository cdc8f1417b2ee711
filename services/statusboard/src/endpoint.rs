//! Endpoint data model as served by the status backend

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Health of a monitored endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EndpointStatus {
    Operational,
    Down,
    Degraded,
    #[default]
    Unknown,
}

impl EndpointStatus {
    /// Fixed label order used by the status distribution chart
    pub const ALL: [EndpointStatus; 4] = [
        EndpointStatus::Operational,
        EndpointStatus::Down,
        EndpointStatus::Degraded,
        EndpointStatus::Unknown,
    ];

    /// Map a backend label onto a status. Anything unrecognised is Unknown.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Operational" => EndpointStatus::Operational,
            "Down" => EndpointStatus::Down,
            "Degraded" => EndpointStatus::Degraded,
            _ => EndpointStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointStatus::Operational => "Operational",
            EndpointStatus::Down => "Down",
            EndpointStatus::Degraded => "Degraded",
            EndpointStatus::Unknown => "Unknown",
        }
    }

    /// Position of this status in [`EndpointStatus::ALL`]
    pub fn index(&self) -> usize {
        match self {
            EndpointStatus::Operational => 0,
            EndpointStatus::Down => 1,
            EndpointStatus::Degraded => 2,
            EndpointStatus::Unknown => 3,
        }
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EndpointStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EndpointStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept any JSON value so a bad status never fails the whole payload
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(|v| v.as_str())
            .map(EndpointStatus::from_label)
            .unwrap_or_default())
    }
}

/// Backend-assigned endpoint identifier, echoed back in the form it arrived
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointId::Number(n) => write!(f, "{}", n),
            EndpointId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EndpointId {
    fn from(value: u64) -> Self {
        EndpointId::Number(value)
    }
}

impl From<&str> for EndpointId {
    fn from(value: &str) -> Self {
        EndpointId::Text(value.to_string())
    }
}

/// A single recorded response time sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EndpointStatus>,
}

/// A monitored HTTP target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: String,
    pub url: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
    #[serde(default)]
    pub current_status: EndpointStatus,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    pub response_history: Vec<Observation>,
}

/// Result of checking one endpoint in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: EndpointId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "status")]
    pub current_status: EndpointStatus,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload for registering a new endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEndpoint {
    pub url: String,
    pub name: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

fn default_expected_status() -> u16 {
    200
}

/// Timestamp parsing that accepts RFC 3339 as well as naive ISO-8601 (taken as UTC)
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", text)))
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", text))),
            None => Ok(None),
        }
    }
}
