use serde::Serialize;
use sqlx::FromRow;
use taskquest_core::types::{DbId, Timestamp};

/// A row from the `achievements` table: one earned achievement.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: DbId,
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: String,
    pub earned_at: Timestamp,
}
