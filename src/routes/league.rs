// src/routes/league.rs
use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::league::{bracket_handler, schedule_handler};
use crate::models::league::{FixtureResultRequest, GenerateScheduleRequest, SeedBracketRequest};

/// Generate (or regenerate) a season's round-robin schedule
#[post("/seasons/{season_id}/schedule")]
async fn generate_schedule(
    path: web::Path<Uuid>,
    request: web::Json<GenerateScheduleRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    schedule_handler::generate_league_schedule(season_id, request, pool).await
}

/// Get a season's schedule
#[get("/seasons/{season_id}/schedule")]
async fn get_schedule(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    schedule_handler::get_league_schedule(season_id, pool).await
}

/// Record a fixture result
#[put("/fixtures/{fixture_id}/result")]
async fn record_result(
    path: web::Path<Uuid>,
    request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    schedule_handler::record_fixture_result(fixture_id, request, pool).await
}

/// Seed round 1 of the knockout bracket
#[post("/seasons/{season_id}/bracket/seed")]
async fn seed_bracket(
    path: web::Path<Uuid>,
    request: web::Json<SeedBracketRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    bracket_handler::seed_knockout_bracket(season_id, request, pool).await
}

/// Advance the latest completed knockout round
#[post("/seasons/{season_id}/bracket/advance")]
async fn advance_bracket(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    bracket_handler::advance_knockout_round(season_id, pool).await
}

/// Start season finalization (single-winner status flip)
#[post("/seasons/{season_id}/finalize")]
async fn finalize_season(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    bracket_handler::finalize_season(season_id, pool).await
}
