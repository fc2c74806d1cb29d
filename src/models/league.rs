// src/models/league.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::league::fixtures::Leg;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LeagueSeason {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub status: SeasonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeasonStatus {
    Active,
    Finalizing,
    Finished,
}

/// A persisted fixture row. Covers both league (round-robin) and
/// knockout play; a NULL away side in the knockout stage is a bye.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub season_id: Uuid,
    pub stage: Stage,
    pub round: i32,
    /// Position of the pairing within its round; preserves generation
    /// order so bracket advancement pairs winners deterministically.
    pub round_position: i32,
    pub is_first_leg: bool,
    pub home_team_id: Uuid,
    pub away_team_id: Option<Uuid>,
    pub status: FixtureStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub winner_team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    League,
    Knockout,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Scheduled,
    Finished,
    Walkover,
    Postponed,
}


// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateScheduleRequest {
    pub team_ids: Vec<Uuid>,
    pub mode: Leg,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SeedBracketRequest {
    pub team_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FixtureResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleResponse {
    pub season_id: Uuid,
    pub total_rounds: i32,
    pub fixtures: Vec<Fixture>,
}
