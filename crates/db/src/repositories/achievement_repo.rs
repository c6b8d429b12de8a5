//! Repository for the `achievements` table.

use sqlx::{PgConnection, PgPool};
use taskquest_core::achievement::{self, AchievementRule, ProgressCounters};
use taskquest_core::types::DbId;

use crate::models::achievement::Achievement;
use crate::repositories::{TaskRepo, UserItemRepo};

/// Column list for `achievements` queries.
const COLUMNS: &str = "id, user_id, key, title, description, icon, earned_at";

/// Provides data access for earned achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Earned achievements, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements WHERE user_id = $1 ORDER BY earned_at, id"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Gather the counters achievement rules are evaluated against.
    pub async fn counters(
        conn: &mut PgConnection,
        user_id: DbId,
        level: i32,
    ) -> Result<ProgressCounters, sqlx::Error> {
        let tasks_completed = TaskRepo::count_completed(&mut *conn, user_id).await?;
        let items_owned = UserItemRepo::count_for_user(&mut *conn, user_id).await?;
        Ok(ProgressCounters {
            tasks_completed,
            level,
            items_owned,
        })
    }

    /// Record one earned achievement. Returns `None` if it was already earned.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        user_id: DbId,
        rule: &AchievementRule,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (user_id, key, title, description, icon) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, key) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .bind(rule.key)
            .bind(rule.title)
            .bind(rule.description)
            .bind(rule.icon)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Evaluate every rule for `user_id` and record the newly satisfied ones.
    ///
    /// Returns only achievements earned by this call.
    pub async fn record_unlocked(
        conn: &mut PgConnection,
        user_id: DbId,
        level: i32,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let counters = Self::counters(&mut *conn, user_id, level).await?;

        let mut earned = Vec::new();
        for rule in achievement::unlocked_rules(&counters) {
            if let Some(row) = Self::insert_if_absent(&mut *conn, user_id, rule).await? {
                earned.push(row);
            }
        }
        Ok(earned)
    }
}
