// src/routes/auth.rs
use actix_web::{get, web, HttpResponse};

use crate::auth::session::SessionService;
use crate::handlers::auth_handler::{session_callback, CallbackQuery};

#[get("/auth/callback")]
async fn auth_callback(
    query: web::Query<CallbackQuery>,
    sessions: web::Data<SessionService>,
) -> HttpResponse {
    session_callback(query, sessions).await
}
