use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::bracket::BracketError;
use crate::league::knockout::{KnockoutError, KnockoutService};
use crate::models::league::SeedBracketRequest;

/// Shuffle-seed round 1 of the knockout bracket.
pub async fn seed_knockout_bracket(
    season_id: Uuid,
    request: web::Json<SeedBracketRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let knockout_service = KnockoutService::new(pool.get_ref().clone());

    match knockout_service.seed(season_id, &request.team_ids).await {
        Ok(created) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": { "entries_created": created }
        }))),
        Err(KnockoutError::Bracket(e)) => {
            Ok(HttpResponse::UnprocessableEntity().json(json!({
                "success": false,
                "message": e.to_string()
            })))
        }
        Err(e) => {
            tracing::error!("Failed to seed bracket for season {}: {}", season_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to seed bracket"
            })))
        }
    }
}

/// Advance the latest completed knockout round. An incomplete round
/// and a decided tournament are informational states, not faults.
pub async fn advance_knockout_round(
    season_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let knockout_service = KnockoutService::new(pool.get_ref().clone());

    match knockout_service.advance(season_id).await {
        Ok(fixtures) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": fixtures
        }))),
        Err(KnockoutError::Bracket(BracketError::RoundIncomplete(round))) => {
            Ok(HttpResponse::Conflict().json(json!({
                "success": false,
                "state": "round_incomplete",
                "message": format!("Round {} still has unfinished ties", round)
            })))
        }
        Err(KnockoutError::Bracket(BracketError::TournamentComplete)) => {
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "state": "tournament_complete",
                "message": "A champion has been decided"
            })))
        }
        Err(KnockoutError::NoBracket) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "No bracket has been seeded for this season"
        }))),
        Err(e) => {
            tracing::error!("Failed to advance bracket for season {}: {}", season_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to advance bracket"
            })))
        }
    }
}

/// Flip the season into `finalizing`; only one caller wins the flip.
pub async fn finalize_season(season_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let knockout_service = KnockoutService::new(pool.get_ref().clone());

    match knockout_service.begin_finalize(season_id).await {
        Ok(Some(season)) => Ok(HttpResponse::Accepted().json(json!({
            "success": true,
            "message": "Season finalization started",
            "data": season
        }))),
        Ok(None) => Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "Season is not active (already finalizing or finished)"
        }))),
        Err(e) => {
            tracing::error!("Failed to finalize season {}: {}", season_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to finalize season"
            })))
        }
    }
}
