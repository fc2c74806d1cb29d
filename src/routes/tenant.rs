// src/routes/tenant.rs
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::handlers::tenant_handler;

#[get("/{tenant}")]
async fn tenant_home(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    tenant_handler::tenant_home(req, path.into_inner()).await
}

#[get("/{tenant}/")]
async fn tenant_home_slash(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    tenant_handler::tenant_home(req, path.into_inner()).await
}

#[get("/{tenant}/dashboard")]
async fn tenant_dashboard(req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    tenant_handler::tenant_dashboard(req, path.into_inner()).await
}
