use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a registered endpoint.
///
/// Identifiers come from a monotonic counter and are never reused while the
/// process runs, so ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(pub u64);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EndpointId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A monitored URL together with its identity and display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Identifier assigned by the registry
    pub id: EndpointId,

    /// Absolute http(s) URL that gets probed
    pub url: String,

    /// Display name, the URL when none was given
    pub name: String,

    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl Endpoint {
    pub(crate) fn new(id: EndpointId, url: String, name: Option<String>) -> Self {
        let name = name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| url.clone());

        Self { id, url, name, created_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_defaults_to_url() {
        let endpoint = Endpoint::new(EndpointId(1), "https://example.com".into(), None);
        assert_eq!(endpoint.name, "https://example.com");

        let blank = Endpoint::new(EndpointId(2), "https://example.com".into(), Some("  ".into()));
        assert_eq!(blank.name, "https://example.com");
    }

    #[test]
    fn test_name_is_trimmed() {
        let endpoint =
            Endpoint::new(EndpointId(1), "https://example.com".into(), Some(" Example ".into()));
        assert_eq!(endpoint.name, "Example");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let endpoint = Endpoint::new(EndpointId(7), "https://example.com".into(), None);
        let value = serde_json::to_value(&endpoint).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["url"], "https://example.com");
        assert!(value.get("createdAt").is_some());
    }
}
