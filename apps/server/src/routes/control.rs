use actix_web::{HttpResponse, post, web};
use apiwatch::Monitor;
use serde_json::json;

macros_utils::routes! {
    route start,
    route stop,
}

/// Start polling. Starting a running monitor changes nothing.
#[post("/api/start")]
pub async fn start(monitor: web::Data<Monitor>) -> HttpResponse {
    monitor.start().await;
    HttpResponse::Ok().json(json!({ "success": true, "running": monitor.is_running().await }))
}

#[post("/api/stop")]
pub async fn stop(monitor: web::Data<Monitor>) -> HttpResponse {
    monitor.stop().await;
    HttpResponse::Ok().json(json!({ "success": true, "running": monitor.is_running().await }))
}
