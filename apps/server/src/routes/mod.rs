use actix_web::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use actix_web::{HttpResponse, HttpResponseBuilder, web};

use crate::error::ApiError;

mod control;
mod dashboard;
mod health;
mod status;
mod urls;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::routes)
        .configure(dashboard::routes)
        .configure(urls::routes)
        .configure(status::routes)
        .configure(control::routes);
}

/// Malformed request bodies get the same `{"error": ...}` shape as every other failure
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// 200 response for read endpoints, readable from any origin
fn read_response() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"));
    builder
}
