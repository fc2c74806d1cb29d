use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use serde_json::json;

use crate::auth::session::RefreshedSession;
use crate::tenancy::middleware::ResolvedTenant;

/// The slug the routing middleware rewrote this request onto, if any.
/// Root-domain requests never carry one, so a bare `/pricing` on the
/// apex cannot masquerade as a tenant site.
fn rewritten_slug(req: &HttpRequest) -> Option<String> {
    req.extensions()
        .get::<ResolvedTenant>()
        .map(|t| t.slug.clone())
}

fn unknown_league() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Unknown league"
    }))
}

/// Tenant site landing page: the target of middleware rewrites for
/// `<slug>.<host>/`.
pub async fn tenant_home(req: HttpRequest, slug: String) -> HttpResponse {
    if rewritten_slug(&req).as_deref() != Some(slug.as_str()) {
        return unknown_league();
    }

    let session_user = req
        .extensions()
        .get::<RefreshedSession>()
        .map(|s| s.user_id);

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "tenant": slug,
            "page": "home",
            "authenticated": session_user.is_some()
        }
    }))
}

/// Tenant admin dashboard, reached via the rewritten path.
pub async fn tenant_dashboard(req: HttpRequest, slug: String) -> HttpResponse {
    if rewritten_slug(&req).as_deref() != Some(slug.as_str()) {
        return unknown_league();
    }

    let session_user = req
        .extensions()
        .get::<RefreshedSession>()
        .map(|s| s.user_id);

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "tenant": slug,
            "page": "dashboard",
            "user_id": session_user
        }
    }))
}
