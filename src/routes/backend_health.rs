use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/backend_health")]
async fn backend_health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
