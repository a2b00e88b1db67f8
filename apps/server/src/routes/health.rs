use actix_web::{HttpResponse, Responder, get};

macros_utils::routes! {
    route health_route,
}

/// Liveness probe for the process itself.
/// The response status is enough, the body stays empty.
#[get("/healthz")]
pub async fn health_route() -> impl Responder {
    HttpResponse::Ok()
}
