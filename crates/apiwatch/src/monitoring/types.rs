use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Up,
    Warning,
    Down,
    Unknown,
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Up => write!(f, "up"),
            ProbeStatus::Warning => write!(f, "warning"),
            ProbeStatus::Down => write!(f, "down"),
            ProbeStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Immutable outcome of one probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRecord {
    /// Status of the probe (up/warning/down/unknown)
    pub status: ProbeStatus,

    /// HTTP status code, only on up/warning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,

    /// Response time in milliseconds, only when a response was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,

    /// Cause of the failure, only on down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Completion time, absent on the never-probed sentinel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl ProbeRecord {
    /// Sentinel for an endpoint that has not been probed yet
    pub fn unknown() -> Self {
        Self { status: ProbeStatus::Unknown, http_code: None, latency_ms: None, error: None, checked_at: None }
    }

    /// A response arrived; 200-399 is up, everything else a warning
    pub fn responded(http_code: u16, latency_ms: u64) -> Self {
        let status = if (200..400).contains(&http_code) { ProbeStatus::Up } else { ProbeStatus::Warning };

        Self {
            status,
            http_code: Some(http_code),
            latency_ms: Some(latency_ms),
            error: None,
            checked_at: Some(Utc::now()),
        }
    }

    /// No response arrived
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Down,
            http_code: None,
            latency_ms: None,
            error: Some(error.into()),
            checked_at: Some(Utc::now()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ProbeStatus::Unknown
    }
}
