use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{http, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
mod handlers;
pub mod league;
pub mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod tenancy;

use crate::auth::session::SessionService;
use crate::config::jwt::JwtSettings;
use crate::config::tenancy::TenancySettings;
use crate::routes::init_routes;
use crate::tenancy::middleware::TenantRouting;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    tenancy_settings: TenancySettings,
    production: bool,
) -> Result<Server, std::io::Error> {
    let session_service = SessionService::new(&jwt_settings);

    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let tenancy_settings = web::Data::new(tenancy_settings);
    let session_service = web::Data::new(session_service);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("https://pitchside.app")
            .allowed_origin("https://www.pitchside.app")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TenantRouting::new(production))
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(tenancy_settings.clone())
            .app_data(session_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
