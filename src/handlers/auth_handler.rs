use actix_web::{cookie::Cookie, http::header, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::auth::session::{AuthError, SessionService, REFRESH_COOKIE, SESSION_COOKIE};
use crate::tenancy::decision::DASHBOARD_PATH;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

/// Post-login callback: exchange the one-time code for a session
/// cookie pair and send the user on to the dashboard.
pub async fn session_callback(
    query: web::Query<CallbackQuery>,
    sessions: web::Data<SessionService>,
) -> HttpResponse {
    match sessions.exchange_code(&query.code).await {
        Ok(session) => {
            let access = Cookie::build(SESSION_COOKIE, session.access_token.clone())
                .path("/")
                .http_only(true)
                .finish();
            let refresh = Cookie::build(REFRESH_COOKIE, session.refresh_token.clone())
                .path("/")
                .http_only(true)
                .finish();
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, DASHBOARD_PATH))
                .cookie(access)
                .cookie(refresh)
                .finish()
        }
        Err(AuthError::InvalidCode) => HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid or expired login code"
        })),
        Err(e) => {
            tracing::error!("Code exchange failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Login failed"
            }))
        }
    }
}
