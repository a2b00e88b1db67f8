use actix_web::{HttpResponse, delete, get, post, web};
use apiwatch::{EndpointId, Monitor};
use serde::Deserialize;
use serde_json::json;

use super::read_response;
use crate::error::ApiError;

macros_utils::routes! {
    route list_urls,
    route add_url,
    route remove_url,
    route delete_url,
}

#[derive(Debug, Deserialize)]
pub struct NewEndpoint {
    #[serde(default)]
    url: String,
    #[serde(default)]
    name: Option<String>,
}

/// Registered endpoints in creation order
#[get("/api/urls")]
pub async fn list_urls(monitor: web::Data<Monitor>) -> HttpResponse {
    read_response().json(monitor.endpoints().await)
}

#[post("/api/urls")]
pub async fn add_url(
    monitor: web::Data<Monitor>,
    body: web::Json<NewEndpoint>,
) -> Result<HttpResponse, ApiError> {
    let NewEndpoint { url, name } = body.into_inner();
    let endpoint = monitor.add_endpoint(&url, name).await?;

    Ok(HttpResponse::Created().json(endpoint))
}

async fn remove(monitor: &Monitor, id: u64) -> Result<HttpResponse, ApiError> {
    monitor.remove_endpoint(EndpointId(id)).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[post("/api/urls/{id}/delete")]
pub async fn remove_url(monitor: web::Data<Monitor>, id: web::Path<u64>) -> Result<HttpResponse, ApiError> {
    remove(&monitor, id.into_inner()).await
}

#[delete("/api/urls/{id}")]
pub async fn delete_url(monitor: web::Data<Monitor>, id: web::Path<u64>) -> Result<HttpResponse, ApiError> {
    remove(&monitor, id.into_inner()).await
}
