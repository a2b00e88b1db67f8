//! Endpoint registry
//!
//! Owns every registered endpoint together with its history buffer. Entries
//! live in an ordered map keyed by a monotonic id, so iteration order is
//! creation order.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock, watch};
use tracing::info;

use crate::endpoint::{Endpoint, EndpointId};
use crate::error::{MonitorError, Result};
use crate::history::HistoryBuffer;
use crate::monitoring::ProbeRecord;
use crate::monitoring::validation::validate_endpoint_url;

struct Entry {
    endpoint: Endpoint,
    history: Arc<Mutex<HistoryBuffer>>,
    /// Dropped with the entry, which closes every receiver handed to probes
    retire: watch::Sender<()>,
}

/// An endpoint due for probing, plus a signal that closes when it is removed
pub(crate) struct ProbeTarget {
    pub endpoint: Endpoint,
    pub retired: watch::Receiver<()>,
}

/// Registry of monitored endpoints
#[derive(Clone)]
pub struct EndpointRegistry {
    entries: Arc<RwLock<BTreeMap<EndpointId, Entry>>>,
    next_id: Arc<AtomicU64>,
    history_capacity: usize,
}

impl EndpointRegistry {
    /// Create an empty registry whose buffers hold `history_capacity` records
    pub fn new(history_capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            history_capacity,
        }
    }

    /// Register a new endpoint
    pub async fn add(&self, url: &str, name: Option<String>) -> Result<Endpoint> {
        let url = validate_endpoint_url(url)?;

        let mut entries = self.entries.write().await;
        let id = EndpointId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let endpoint = Endpoint::new(id, url, name);
        let (retire, _) = watch::channel(());

        entries.insert(
            id,
            Entry {
                endpoint: endpoint.clone(),
                history: Arc::new(Mutex::new(HistoryBuffer::new(self.history_capacity))),
                retire,
            },
        );

        info!(
            endpoint_id = %endpoint.id,
            endpoint_name = %endpoint.name,
            url = %endpoint.url,
            "Endpoint added"
        );

        Ok(endpoint)
    }

    /// Remove an endpoint and discard its history.
    ///
    /// Probes still running for it are signalled to stop.
    pub async fn remove(&self, id: EndpointId) -> Result<Endpoint> {
        let entry = self.entries.write().await.remove(&id).ok_or(MonitorError::NotFound(id))?;

        info!(
            endpoint_id = %id,
            endpoint_name = %entry.endpoint.name,
            "Endpoint removed"
        );

        Ok(entry.endpoint)
    }

    /// All endpoints in creation order
    pub async fn list(&self) -> Vec<Endpoint> {
        self.entries.read().await.values().map(|entry| entry.endpoint.clone()).collect()
    }

    pub async fn get(&self, id: EndpointId) -> Option<Endpoint> {
        self.entries.read().await.get(&id).map(|entry| entry.endpoint.clone())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Recorded history of one endpoint, oldest first
    pub async fn history(&self, id: EndpointId) -> Result<Vec<ProbeRecord>> {
        let entries = self.entries.read().await;
        let entry = entries.get(&id).ok_or(MonitorError::NotFound(id))?;
        Ok(entry.history.lock().await.snapshot())
    }

    /// Current status of one endpoint
    pub async fn latest(&self, id: EndpointId) -> Result<ProbeRecord> {
        let entries = self.entries.read().await;
        let entry = entries.get(&id).ok_or(MonitorError::NotFound(id))?;
        Ok(entry.history.lock().await.latest())
    }

    /// Endpoints with their latest record and full history, in creation order
    pub async fn statuses(&self) -> Vec<(Endpoint, ProbeRecord, Vec<ProbeRecord>)> {
        let entries = self.entries.read().await;
        let mut statuses = Vec::with_capacity(entries.len());

        for entry in entries.values() {
            let history = entry.history.lock().await;
            statuses.push((entry.endpoint.clone(), history.latest(), history.snapshot()));
        }

        statuses
    }

    /// Snapshot of the endpoints a polling round should probe
    pub(crate) async fn probe_targets(&self) -> Vec<ProbeTarget> {
        self.entries
            .read()
            .await
            .values()
            .map(|entry| ProbeTarget {
                endpoint: entry.endpoint.clone(),
                retired: entry.retire.subscribe(),
            })
            .collect()
    }

    /// Append a probe record. Returns false when the endpoint is gone.
    pub(crate) async fn record(&self, id: EndpointId, record: ProbeRecord) -> bool {
        let entries = self.entries.read().await;
        match entries.get(&id) {
            Some(entry) => {
                entry.history.lock().await.append(record);
                true
            }
            None => false,
        }
    }
}
