use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::settings::MonitorSettings;
use super::types::ProbeRecord;
use crate::endpoint::Endpoint;
use crate::error::MonitorError;

/// Transport seam under the prober
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Issue one request and return the HTTP status code of the response
    async fn check(&self, target: &str) -> Result<u16>;
}

/// HTTP/HTTPS checker
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration, user_agent: &str) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| MonitorError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, target: &str) -> Result<u16> {
        let response = self.client.get(target).send().await.map_err(|e| anyhow!(describe(&e)))?;

        Ok(response.status().as_u16())
    }
}

/// Human readable cause of a transport failure
fn describe(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "Request timed out"
    } else if error.is_connect() {
        "Connection failed"
    } else if error.is_redirect() {
        "Redirect loop"
    } else {
        "Request failed"
    };

    // reqwest's Display only shows the outermost layer
    let mut message = format!("{kind}: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

/// Runs one probe against an endpoint and classifies the outcome
#[derive(Clone)]
pub struct Prober {
    checker: Arc<dyn Checker>,
    timeout: Duration,
}

impl Prober {
    /// Create a prober backed by a real HTTP client
    pub fn new(settings: &MonitorSettings) -> crate::Result<Self> {
        let checker = HttpChecker::new(settings.probe_timeout, &settings.user_agent)?;
        Ok(Self::with_checker(Arc::new(checker), settings.probe_timeout))
    }

    /// Create a prober on top of any transport
    pub fn with_checker(checker: Arc<dyn Checker>, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe the endpoint. Never fails: transport faults become DOWN records.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeRecord {
        let start = Instant::now();

        let record = match timeout(self.timeout, self.checker.check(&endpoint.url)).await {
            Ok(Ok(code)) => ProbeRecord::responded(code, start.elapsed().as_millis() as u64),
            Ok(Err(e)) => ProbeRecord::failed(e.to_string()),
            Err(_) => ProbeRecord::failed(format!("Probe timed out after {:?}", self.timeout)),
        };

        if record.error.is_some() {
            warn!(
                endpoint_id = %endpoint.id,
                endpoint_name = %endpoint.name,
                error = ?record.error,
                "Endpoint is down"
            );
        } else {
            debug!(
                endpoint_id = %endpoint.id,
                endpoint_name = %endpoint.name,
                status = %record.status,
                http_code = ?record.http_code,
                latency_ms = ?record.latency_ms,
                "Probe completed"
            );
        }

        record
    }
}
