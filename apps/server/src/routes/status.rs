use actix_web::{HttpResponse, get, web};
use apiwatch::{EndpointId, Monitor};
use serde::Serialize;

use super::read_response;
use crate::error::ApiError;

macros_utils::routes! {
    route status,
    route history,
    route monitor_state,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    running: bool,
    interval_secs: u64,
    timeout_secs: u64,
    history_capacity: usize,
    endpoints: usize,
}

/// Latest record and history of every endpoint, keyed by id
#[get("/api/status")]
pub async fn status(monitor: web::Data<Monitor>) -> HttpResponse {
    read_response().json(monitor.status_report().await)
}

#[get("/api/history/{id}")]
pub async fn history(monitor: web::Data<Monitor>, id: web::Path<u64>) -> Result<HttpResponse, ApiError> {
    let history = monitor.history(EndpointId(id.into_inner())).await?;
    Ok(read_response().json(history))
}

#[get("/api/monitor")]
pub async fn monitor_state(monitor: web::Data<Monitor>) -> HttpResponse {
    let settings = monitor.settings();
    let info = MonitorInfo {
        running: monitor.is_running().await,
        interval_secs: settings.interval.as_secs(),
        timeout_secs: settings.probe_timeout.as_secs(),
        history_capacity: settings.history_capacity,
        endpoints: monitor.registry().len().await,
    };

    read_response().json(info)
}
