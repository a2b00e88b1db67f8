use thiserror::Error;

use crate::endpoint::EndpointId;

/// Errors returned by registry and monitor operations.
///
/// Probe failures are not part of this enum: they are recorded as DOWN
/// records and never surface to callers.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Endpoint {0} not found")]
    NotFound(EndpointId),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
