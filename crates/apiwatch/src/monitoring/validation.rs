//! Input validation for endpoints and monitor settings.

use std::time::Duration;

use url::Url;

use super::settings::MonitorSettings;
use crate::error::{MonitorError, Result};

/// Validate an endpoint URL and return it trimmed.
///
/// The URL must be absolute, use the http or https scheme and name a host.
pub fn validate_endpoint_url(target: &str) -> Result<String> {
    let target = target.trim();
    if target.is_empty() {
        return Err(MonitorError::InvalidInput("URL must not be empty".into()));
    }

    let url = Url::parse(target)
        .map_err(|e| MonitorError::InvalidInput(format!("Invalid URL '{target}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(MonitorError::InvalidInput(format!(
                "Unsupported URL scheme: {other} (expected http or https)"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(MonitorError::InvalidInput(format!("URL has no host: {target}")));
    }

    if url.port() == Some(0) {
        return Err(MonitorError::InvalidInput("Port 0 is not valid".into()));
    }

    Ok(target.to_string())
}

/// Validate check interval
pub fn validate_check_interval(interval_seconds: u64) -> Result<()> {
    const MIN_INTERVAL: u64 = 1;
    const MAX_INTERVAL: u64 = 86400; // 24 hours

    if interval_seconds < MIN_INTERVAL {
        return Err(MonitorError::InvalidInput(format!(
            "Check interval too short: {interval_seconds} seconds (minimum: {MIN_INTERVAL})"
        )));
    }

    if interval_seconds > MAX_INTERVAL {
        return Err(MonitorError::InvalidInput(format!(
            "Check interval too long: {interval_seconds} seconds (maximum: {MAX_INTERVAL})"
        )));
    }

    Ok(())
}

/// Validate probe timeout
pub fn validate_timeout(timeout_seconds: u64) -> Result<()> {
    const MIN_TIMEOUT: u64 = 1;
    const MAX_TIMEOUT: u64 = 300; // 5 minutes

    if timeout_seconds < MIN_TIMEOUT {
        return Err(MonitorError::InvalidInput(format!(
            "Timeout too short: {timeout_seconds} seconds (minimum: {MIN_TIMEOUT})"
        )));
    }

    if timeout_seconds > MAX_TIMEOUT {
        return Err(MonitorError::InvalidInput(format!(
            "Timeout too long: {timeout_seconds} seconds (maximum: {MAX_TIMEOUT})"
        )));
    }

    Ok(())
}

/// Validate history capacity
pub fn validate_history_capacity(capacity: usize) -> Result<()> {
    const MAX_CAPACITY: usize = 10_000;

    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(MonitorError::InvalidInput(format!(
            "History capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
        )));
    }

    Ok(())
}

/// Validate the interval, timeout and capacity as a whole
pub fn validate_settings(interval_seconds: u64, timeout_seconds: u64, capacity: usize) -> Result<()> {
    validate_check_interval(interval_seconds)?;
    validate_timeout(timeout_seconds)?;
    validate_history_capacity(capacity)?;

    if timeout_seconds > interval_seconds {
        return Err(MonitorError::InvalidInput(format!(
            "Timeout ({timeout_seconds}s) must not exceed the check interval ({interval_seconds}s)"
        )));
    }

    Ok(())
}

/// Validate a polling period; a zero period would never tick
pub fn validate_period(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(MonitorError::InvalidInput("Check interval must be greater than zero".into()));
    }

    Ok(())
}

/// Validate settings handed to the library directly.
///
/// Sub-second durations are accepted here; the whole-second ranges of
/// `validate_settings` apply to configuration input.
pub fn validate_monitor_settings(settings: &MonitorSettings) -> Result<()> {
    validate_period(settings.interval)?;

    if settings.probe_timeout.is_zero() {
        return Err(MonitorError::InvalidInput("Timeout must be greater than zero".into()));
    }

    validate_history_capacity(settings.history_capacity)
}
