// src/routes/root.rs
//
// Root-domain pages: the marketing site, login and the admin
// dashboard shell. These are the pass-through and redirect targets of
// the tenant routing middleware.
use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/")]
async fn marketing_home() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "page": "marketing" }
    }))
}

#[get("/login")]
async fn login_page() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "page": "login" }
    }))
}

#[get("/dashboard")]
async fn dashboard_page() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "page": "dashboard" }
    }))
}
