use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::schedule::{ScheduleService, ScheduleServiceError};
use crate::models::league::{FixtureResultRequest, GenerateScheduleRequest};

/// Generate (or regenerate) the round-robin schedule for a season.
pub async fn generate_league_schedule(
    season_id: Uuid,
    request: web::Json<GenerateScheduleRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let schedule_service = ScheduleService::new(pool.get_ref().clone());

    match schedule_service
        .regenerate(season_id, &request.team_ids, request.mode)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": { "fixtures_created": created }
        }))),
        Err(ScheduleServiceError::Schedule(e)) => {
            Ok(HttpResponse::UnprocessableEntity().json(json!({
                "success": false,
                "message": e.to_string()
            })))
        }
        Err(ScheduleServiceError::Database(e)) => {
            tracing::error!("Failed to persist schedule for season {}: {}", season_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to persist schedule"
            })))
        }
    }
}

/// Full schedule for a season.
pub async fn get_league_schedule(
    season_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let schedule_service = ScheduleService::new(pool.get_ref().clone());

    match schedule_service.get_schedule(season_id).await {
        Ok(schedule) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": schedule
        }))),
        Err(e) => {
            tracing::error!("Failed to get schedule for season {}: {}", season_id, e);
            Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Schedule not found"
            })))
        }
    }
}

/// Record the result of a fixture.
pub async fn record_fixture_result(
    fixture_id: Uuid,
    request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let schedule_service = ScheduleService::new(pool.get_ref().clone());

    match schedule_service
        .record_result(fixture_id, request.home_score, request.away_score)
        .await
    {
        Ok(fixture) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": fixture
        }))),
        Err(sqlx::Error::RowNotFound) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Fixture not found"
        }))),
        Err(e) => {
            tracing::error!("Failed to record result for fixture {}: {}", fixture_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to record result"
            })))
        }
    }
}
