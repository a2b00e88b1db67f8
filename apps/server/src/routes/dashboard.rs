use actix_web::{HttpResponse, Responder, get, http::header::ContentType};

macros_utils::routes! {
    route dashboard_route,
}

const DASHBOARD: &str = include_str!("../../assets/dashboard.html");

#[get("/")]
pub async fn dashboard_route() -> impl Responder {
    HttpResponse::Ok().content_type(ContentType::html()).body(DASHBOARD)
}
