use std::time::Duration;

use crate::{DEFAULT_HISTORY_CAPACITY, DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, USER_AGENT};

/// Settings the monitor is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Time between the starts of two polling ticks
    pub interval: Duration,

    /// Upper bound for a single probe
    pub probe_timeout: Duration,

    /// Records kept per endpoint
    pub history_capacity: usize,

    /// User agent sent with every probe
    pub user_agent: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl MonitorSettings {
    /// Create a new settings builder
    pub fn builder() -> MonitorSettingsBuilder {
        MonitorSettingsBuilder::default()
    }
}

/// Builder for MonitorSettings
#[derive(Debug, Default)]
pub struct MonitorSettingsBuilder {
    settings: MonitorSettings,
}

impl MonitorSettingsBuilder {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.settings.interval = interval;
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.settings.probe_timeout = timeout;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.settings.history_capacity = capacity;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> MonitorSettings {
        self.settings
    }
}
