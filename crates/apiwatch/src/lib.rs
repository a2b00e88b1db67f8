//! apiwatch - polling engine for HTTP(S) endpoint status monitoring
//!
//! This library keeps a registry of endpoints, probes them on a fixed
//! interval while monitoring is running, and retains a bounded history of
//! probe records per endpoint.

pub mod endpoint;
pub mod error;
pub mod history;
pub mod monitor;
pub mod monitoring;
pub mod registry;

// Re-export main types
pub use endpoint::{Endpoint, EndpointId};
pub use error::{MonitorError, Result};
pub use history::HistoryBuffer;
pub use monitor::{EndpointReport, Monitor};
pub use monitoring::{
    Checker, EndpointSnapshot, HttpChecker, MonitorScheduler, MonitorSettings, MonitorState,
    ProbeRecord, ProbeStatus, Prober,
};
pub use registry::EndpointRegistry;

/// Default time between two polling ticks, in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Default upper bound for a single probe, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of records kept per endpoint
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// User agent sent with every probe
pub const USER_AGENT: &str = concat!("apiwatch/", env!("CARGO_PKG_VERSION"));
