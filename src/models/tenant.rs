// src/models/tenant.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Path segments that routes claim for themselves. A tenant slug must
/// never collide with one of these, otherwise the rewritten path
/// `/<slug>/...` becomes ambiguous with a system route.
pub const RESERVED_SEGMENTS: &[&str] = &[
    "login",
    "signup",
    "dashboard",
    "admin",
    "auth",
    "api",
    "static",
    "assets",
    "backend_health",
    "track",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A slug is lowercase alphanumeric plus hyphens, non-empty, and not a
/// reserved system segment.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || RESERVED_SEGMENTS.contains(&slug) {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
