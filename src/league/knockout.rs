// src/league/knockout.rs
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::bracket::{advance_round, seed_round_one, BracketError, BracketPairing};
use crate::models::league::{Fixture, FixtureStatus, LeagueSeason};

#[derive(Debug, thiserror::Error)]
pub enum KnockoutError {
    #[error(transparent)]
    Bracket(#[from] BracketError),
    #[error("no knockout rounds exist for this season")]
    NoBracket,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence around the pure bracket engine: seeding round 1,
/// advancing completed rounds and the season finalization guard.
pub struct KnockoutService {
    pool: PgPool,
}

impl KnockoutService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shuffle-seed round 1 and persist it, replacing any previous
    /// bracket for the season in the same transaction.
    pub async fn seed(
        &self,
        season_id: Uuid,
        team_ids: &[Uuid],
    ) -> Result<i64, KnockoutError> {
        let round1 = seed_round_one(team_ids)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM fixtures WHERE season_id = $1 AND stage = 'knockout'")
            .bind(season_id)
            .execute(&mut *tx)
            .await?;

        let inserted = Self::insert_round(&mut tx, season_id, &round1).await?;
        tx.commit().await?;

        tracing::info!(
            "Seeded knockout round 1 for season {}: {} entries",
            season_id,
            inserted
        );
        Ok(inserted)
    }

    /// Advance the latest persisted round. `RoundIncomplete` and
    /// `TournamentComplete` surface as typed outcomes for the handler,
    /// not as transport errors.
    pub async fn advance(&self, season_id: Uuid) -> Result<Vec<Fixture>, KnockoutError> {
        let current = self.latest_round(season_id).await?;
        if current.is_empty() {
            return Err(KnockoutError::NoBracket);
        }

        let pairings: Vec<BracketPairing> = current.iter().map(row_to_pairing).collect();
        let next = advance_round(&pairings)?;

        let mut tx = self.pool.begin().await?;
        Self::insert_round(&mut tx, season_id, &next).await?;
        tx.commit().await?;

        let round = next.first().map(|p| p.round as i32).unwrap_or(0);
        let fixtures = sqlx::query_as::<_, Fixture>(
            r#"
            SELECT * FROM fixtures
            WHERE season_id = $1 AND stage = 'knockout' AND round = $2
            ORDER BY round_position
            "#,
        )
        .bind(season_id)
        .bind(round)
        .fetch_all(&self.pool)
        .await?;

        Ok(fixtures)
    }

    /// Flip the season from `active` to `finalizing`. The status
    /// transition is the idempotency key: only the request that wins
    /// the UPDATE proceeds, which holds across restarts and multiple
    /// instances where an in-process flag would not.
    pub async fn begin_finalize(
        &self,
        season_id: Uuid,
    ) -> Result<Option<LeagueSeason>, sqlx::Error> {
        sqlx::query_as::<_, LeagueSeason>(
            r#"
            UPDATE league_seasons
            SET status = 'finalizing', updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(season_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn latest_round(&self, season_id: Uuid) -> Result<Vec<Fixture>, sqlx::Error> {
        sqlx::query_as::<_, Fixture>(
            r#"
            SELECT * FROM fixtures
            WHERE season_id = $1 AND stage = 'knockout'
              AND round = (
                  SELECT MAX(round) FROM fixtures
                  WHERE season_id = $1 AND stage = 'knockout'
              )
            ORDER BY round_position
            "#,
        )
        .bind(season_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_round(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        season_id: Uuid,
        round: &[BracketPairing],
    ) -> Result<i64, sqlx::Error> {
        let mut inserted: i64 = 0;
        for (position, pairing) in round.iter().enumerate() {
            let status = if pairing.away.is_none() {
                "walkover"
            } else {
                "scheduled"
            };
            sqlx::query(
                r#"
                INSERT INTO fixtures (
                    id, season_id, stage, round, round_position, is_first_leg,
                    home_team_id, away_team_id, status,
                    home_score, away_score, winner_team_id
                ) VALUES ($1, $2, 'knockout', $3, $4, TRUE, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(season_id)
            .bind(pairing.round as i32)
            .bind(position as i32)
            .bind(pairing.home)
            .bind(pairing.away)
            .bind(status)
            .bind(pairing.home_score)
            .bind(pairing.away_score)
            .bind(pairing.winner())
            .execute(&mut **tx)
            .await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

fn row_to_pairing(fixture: &Fixture) -> BracketPairing {
    BracketPairing {
        home: fixture.home_team_id,
        away: fixture.away_team_id,
        round: fixture.round as u32,
        home_score: fixture.home_score,
        away_score: fixture.away_score,
        finished: matches!(
            fixture.status,
            FixtureStatus::Finished | FixtureStatus::Walkover
        ),
    }
}
