// src/league/schedule.rs
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::fixtures::{generate_fixtures, rounds_per_leg, Leg, ScheduleError};
use crate::models::league::{Fixture, ScheduleResponse};

#[derive(Debug, thiserror::Error)]
pub enum ScheduleServiceError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service responsible for league schedule persistence.
///
/// Generation itself is pure (`league::fixtures`); this wraps the
/// generate-then-persist sequence in a single transaction so a partial
/// schedule is never left visible. Concurrent regeneration for the
/// same season is the caller's problem (single-writer semantics).
pub struct ScheduleService {
    pool: PgPool,
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the season's league schedule with a freshly generated
    /// round-robin. Delete-then-insert inside one transaction.
    pub async fn regenerate(
        &self,
        season_id: Uuid,
        team_ids: &[Uuid],
        mode: Leg,
    ) -> Result<i64, ScheduleServiceError> {
        let pairings = generate_fixtures(team_ids, mode)?;

        tracing::info!(
            "Generating {} league fixtures over {} rounds for season {}",
            pairings.len(),
            rounds_per_leg(team_ids.len()) * if mode == Leg::Double { 2 } else { 1 },
            season_id
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM fixtures WHERE season_id = $1 AND stage = 'league'")
            .bind(season_id)
            .execute(&mut *tx)
            .await?;

        let mut inserted: i64 = 0;
        let mut position = 0i32;
        let mut current_round = 0u32;
        for pairing in &pairings {
            if pairing.round != current_round {
                current_round = pairing.round;
                position = 0;
            }
            sqlx::query(
                r#"
                INSERT INTO fixtures (
                    id, season_id, stage, round, round_position, is_first_leg,
                    home_team_id, away_team_id, status
                ) VALUES ($1, $2, 'league', $3, $4, $5, $6, $7, 'scheduled')
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(season_id)
            .bind(pairing.round as i32)
            .bind(position)
            .bind(pairing.is_first_leg)
            .bind(pairing.home)
            .bind(pairing.away)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
            position += 1;
        }

        tx.commit().await?;

        tracing::info!("Schedule generation complete: {} fixtures", inserted);
        Ok(inserted)
    }

    /// Full league schedule for a season, in round order.
    pub async fn get_schedule(&self, season_id: Uuid) -> Result<ScheduleResponse, sqlx::Error> {
        let fixtures = sqlx::query_as::<_, Fixture>(
            r#"
            SELECT * FROM fixtures
            WHERE season_id = $1 AND stage = 'league'
            ORDER BY round, round_position
            "#,
        )
        .bind(season_id)
        .fetch_all(&self.pool)
        .await?;

        let total_rounds = fixtures.iter().map(|f| f.round).max().unwrap_or(0);
        Ok(ScheduleResponse {
            season_id,
            total_rounds,
            fixtures,
        })
    }

    /// Record a result for a fixture. League play allows draws, so the
    /// winner column stays NULL on equal scores.
    pub async fn record_result(
        &self,
        fixture_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, sqlx::Error> {
        let fixture = sqlx::query_as::<_, Fixture>(
            r#"
            UPDATE fixtures
            SET home_score = $2,
                away_score = $3,
                status = 'finished',
                winner_team_id = CASE
                    WHEN $2 > $3 THEN home_team_id
                    WHEN $3 > $2 THEN away_team_id
                    ELSE NULL
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(fixture_id)
        .bind(home_score)
        .bind(away_score)
        .fetch_one(&self.pool)
        .await?;

        Ok(fixture)
    }
}
