/// Monitoring engine module - probes endpoints and drives the polling cycle
///
/// This module is responsible for:
/// - Executing HTTP/HTTPS probes and classifying their outcome
/// - Running the start/stop controlled polling loop
/// - Validating endpoint URLs and monitor settings
pub mod checker;
pub mod scheduler;
pub mod settings;
pub mod types;
pub mod validation;

pub use checker::{Checker, HttpChecker, Prober};
pub use scheduler::{EndpointSnapshot, MonitorScheduler, MonitorState};
pub use settings::{MonitorSettings, MonitorSettingsBuilder};
pub use types::{ProbeRecord, ProbeStatus};
