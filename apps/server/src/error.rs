use std::io::Error as IoError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use apiwatch::MonitorError;
use serde_json::json;
use thiserror::Error;

use crate::config;

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    #[error("Monitor setup failed: {0}")]
    Monitor(#[from] MonitorError),
}

/// Errors returned by API handlers, rendered as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    #[error("{0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Monitor(MonitorError::InvalidInput(_)) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Monitor(MonitorError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Monitor(MonitorError::Client(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
