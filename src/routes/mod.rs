use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod league;
pub mod root;
pub mod tenant;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(auth::auth_callback);

    // Root-domain pages
    cfg.service(root::marketing_home)
        .service(root::login_page)
        .service(root::dashboard_page);

    // League admin routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::generate_schedule)
            .service(league::get_schedule)
            .service(league::record_result)
            .service(league::seed_bracket)
            .service(league::advance_bracket)
            .service(league::finalize_season),
    );

    // Tenant-scoped site routes; rewritten requests land here.
    // Registered last so system routes keep precedence over the
    // dynamic slug segment.
    cfg.service(tenant::tenant_home)
        .service(tenant::tenant_home_slash)
        .service(tenant::tenant_dashboard);
}
