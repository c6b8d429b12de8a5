//! Repository for the `tasks` table.
//!
//! Read and edit queries are scoped by `user_id`, so another user's task is
//! indistinguishable from a missing one. Completion toggling goes through
//! [`crate::repositories::EconomyRepo`] instead, because it awards XP.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor, PgPool};
use taskquest_core::types::{DbId, Xp};

use crate::models::task::{CreateTask, Task, TaskCounts, TaskFilter, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str = "\
    id, user_id, title, description, category, priority, completed, \
    xp_value, due_date, created_at, updated_at";

/// Provides data access for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task with an already-resolved experience value.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        dto: &CreateTask,
        xp_value: Xp,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (user_id, title, description, category, priority, xp_value, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(dto.title.trim())
            .bind(&dto.description)
            .bind(dto.category.as_str())
            .bind(dto.priority.as_str())
            .bind(xp_value)
            .bind(dto.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tasks: pending first, then by due date (undated last).
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE user_id = $1 \
               AND ($2::BOOLEAN IS NULL OR completed = $2) \
               AND ($3::TEXT IS NULL OR category = $3) \
               AND ($4::DATE IS NULL OR due_date = $4) \
             ORDER BY completed, due_date NULLS LAST, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(filter.completed)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.due)
            .fetch_all(pool)
            .await
    }

    /// Partially update a task.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        dto: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 category = COALESCE($5, category), \
                 priority = COALESCE($6, priority), \
                 due_date = COALESCE($7, due_date) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(&dto.description)
            .bind(dto.category.map(|c| c.as_str()))
            .bind(dto.priority.map(|p| p.as_str()))
            .bind(dto.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Row-lock a task by id regardless of owner; the caller checks ownership.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn set_completed(
        conn: &mut PgConnection,
        id: DbId,
        completed: bool,
    ) -> Result<Task, sqlx::Error> {
        let query =
            format!("UPDATE tasks SET completed = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(completed)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn count_completed<'e, E>(executor: E, user_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE user_id = $1 AND completed = true",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Completed and total counts of tasks due on `day` or without a due date.
    pub async fn counts_for_day(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
    ) -> Result<TaskCounts, sqlx::Error> {
        sqlx::query_as::<_, TaskCounts>(
            "SELECT \
                 COUNT(*) FILTER (WHERE completed) AS completed, \
                 COUNT(*) AS total \
             FROM tasks \
             WHERE user_id = $1 AND (due_date = $2 OR due_date IS NULL)",
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(pool)
        .await
    }
}
