//! The monitor context handed to every request handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, EndpointId};
use crate::error::Result;
use crate::monitoring::validation::validate_monitor_settings;
use crate::monitoring::{
    Checker, EndpointSnapshot, MonitorScheduler, MonitorSettings, MonitorState, ProbeRecord, Prober,
};
use crate::registry::EndpointRegistry;

/// Current status of an endpoint together with its recorded history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointReport {
    #[serde(flatten)]
    pub latest: ProbeRecord,
    pub history: Vec<ProbeRecord>,
}

/// Registry plus scheduler, constructed once per process
pub struct Monitor {
    settings: MonitorSettings,
    registry: EndpointRegistry,
    scheduler: MonitorScheduler,
}

impl Monitor {
    /// Create a stopped monitor that probes over HTTP
    pub fn new(settings: MonitorSettings) -> Result<Self> {
        validate_monitor_settings(&settings)?;
        let prober = Prober::new(&settings)?;
        Self::with_prober(settings, prober)
    }

    /// Create a stopped monitor on top of a custom transport
    pub fn with_checker(settings: MonitorSettings, checker: Arc<dyn Checker>) -> Result<Self> {
        validate_monitor_settings(&settings)?;
        let prober = Prober::with_checker(checker, settings.probe_timeout);
        Self::with_prober(settings, prober)
    }

    fn with_prober(settings: MonitorSettings, prober: Prober) -> Result<Self> {
        let registry = EndpointRegistry::new(settings.history_capacity);
        let scheduler = MonitorScheduler::new(registry.clone(), prober, settings.interval)?;
        Ok(Self { settings, registry, scheduler })
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub async fn add_endpoint(&self, url: &str, name: Option<String>) -> Result<Endpoint> {
        self.registry.add(url, name).await
    }

    pub async fn remove_endpoint(&self, id: EndpointId) -> Result<Endpoint> {
        self.registry.remove(id).await
    }

    pub async fn endpoints(&self) -> Vec<Endpoint> {
        self.registry.list().await
    }

    pub async fn endpoint(&self, id: EndpointId) -> Option<Endpoint> {
        self.registry.get(id).await
    }

    pub async fn history(&self, id: EndpointId) -> Result<Vec<ProbeRecord>> {
        self.registry.history(id).await
    }

    pub async fn start(&self) -> bool {
        self.scheduler.start().await
    }

    pub async fn stop(&self) -> bool {
        self.scheduler.stop().await
    }

    pub async fn state(&self) -> MonitorState {
        self.scheduler.state().await
    }

    pub async fn is_running(&self) -> bool {
        self.scheduler.is_running().await
    }

    /// Probe every endpoint once, now
    pub async fn run_round(&self) {
        self.scheduler.run_round().await
    }

    /// Latest record per endpoint, in creation order
    pub async fn snapshot(&self) -> Vec<EndpointSnapshot> {
        self.scheduler.snapshot().await
    }

    /// Status of every endpoint keyed by id, each with its full history
    pub async fn status_report(&self) -> BTreeMap<EndpointId, EndpointReport> {
        self.registry
            .statuses()
            .await
            .into_iter()
            .map(|(endpoint, latest, history)| (endpoint.id, EndpointReport { latest, history }))
            .collect()
    }
}
