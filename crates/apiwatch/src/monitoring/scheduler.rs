use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use super::checker::Prober;
use super::types::ProbeRecord;
use super::validation::validate_period;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::registry::{EndpointRegistry, ProbeTarget};

/// Whether the polling cycle is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Stopped,
    Running,
}

/// An endpoint with its current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSnapshot {
    pub endpoint: Endpoint,
    pub latest: ProbeRecord,
}

enum RunState {
    Stopped,
    Running(PollingCycle),
}

struct PollingCycle {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Monitoring scheduler - drives the polling cycle over the registry
pub struct MonitorScheduler {
    registry: EndpointRegistry,
    prober: Arc<Prober>,
    interval: Duration,
    state: Mutex<RunState>,
}

impl MonitorScheduler {
    /// Create a stopped scheduler. Fails on a zero interval.
    pub fn new(registry: EndpointRegistry, prober: Prober, interval: Duration) -> Result<Self> {
        validate_period(interval)?;
        Ok(Self { registry, prober: Arc::new(prober), interval, state: Mutex::new(RunState::Stopped) })
    }

    /// Start polling. Returns false if it was already running.
    pub async fn start(&self) -> bool {
        let mut state = self.state.lock().await;
        if matches!(*state, RunState::Running(_)) {
            return false;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(polling_cycle(
            self.registry.clone(),
            self.prober.clone(),
            self.interval,
            shutdown_rx,
        ));

        *state = RunState::Running(PollingCycle { shutdown_tx, handle });
        info!(
            interval_secs = self.interval.as_secs_f64(),
            timeout_secs = self.prober.timeout().as_secs_f64(),
            "Monitoring started"
        );
        true
    }

    /// Stop polling. Returns false if it was already stopped.
    ///
    /// Probes of the round in flight are abandoned; once this returns, the
    /// polling task has exited and nothing more gets recorded.
    pub async fn stop(&self) -> bool {
        let mut state = self.state.lock().await;
        let cycle = match std::mem::replace(&mut *state, RunState::Stopped) {
            RunState::Stopped => return false,
            RunState::Running(cycle) => cycle,
        };

        let _ = cycle.shutdown_tx.send(true);
        if let Err(e) = cycle.handle.await {
            error!("Polling task ended abnormally: {}", e);
        }

        info!("Monitoring stopped");
        true
    }

    pub async fn state(&self) -> MonitorState {
        match *self.state.lock().await {
            RunState::Stopped => MonitorState::Stopped,
            RunState::Running(_) => MonitorState::Running,
        }
    }

    pub async fn is_running(&self) -> bool {
        self.state().await == MonitorState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn probe_timeout(&self) -> Duration {
        self.prober.timeout()
    }

    /// Probe every endpoint once, now, whatever the state
    pub async fn run_round(&self) {
        let mut round = dispatch_round(&self.registry, &self.prober).await;
        drain_round(&mut round).await;
    }

    /// Latest record of every endpoint, in creation order
    pub async fn snapshot(&self) -> Vec<EndpointSnapshot> {
        self.registry
            .statuses()
            .await
            .into_iter()
            .map(|(endpoint, latest, _)| EndpointSnapshot { endpoint, latest })
            .collect()
    }
}

async fn polling_cycle(
    registry: EndpointRegistry,
    prober: Arc<Prober>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.changed() => break,
            _ = timer.tick() => {}
        }

        let mut round = dispatch_round(&registry, &prober).await;

        tokio::select! {
            biased;
            _ = shutdown_rx.changed() => {
                round.shutdown().await;
                break;
            }
            _ = drain_round(&mut round) => {}
        }
    }

    debug!("Polling cycle exited");
}

/// Spawn one probe task per registered endpoint
async fn dispatch_round(registry: &EndpointRegistry, prober: &Arc<Prober>) -> JoinSet<()> {
    let targets = registry.probe_targets().await;
    debug!(count = targets.len(), "Dispatching probe round");

    let mut round = JoinSet::new();
    for target in targets {
        round.spawn(probe_and_record(registry.clone(), prober.clone(), target));
    }
    round
}

/// Wait for every probe of a round, logging tasks that died
async fn drain_round(round: &mut JoinSet<()>) {
    while let Some(result) = round.join_next().await {
        if let Err(e) = result {
            if e.is_panic() {
                error!("Probe task panicked: {}", e);
            }
        }
    }
}

async fn probe_and_record(registry: EndpointRegistry, prober: Arc<Prober>, target: ProbeTarget) {
    let ProbeTarget { endpoint, mut retired } = target;

    let record = tokio::select! {
        // Only ever resolves once the registry drops the entry
        _ = retired.changed() => {
            debug!(endpoint_id = %endpoint.id, "Endpoint removed, probe cancelled");
            return;
        }
        record = prober.probe(&endpoint) => record,
    };

    if !registry.record(endpoint.id, record).await {
        debug!(endpoint_id = %endpoint.id, "Endpoint removed, probe result discarded");
    }
}
