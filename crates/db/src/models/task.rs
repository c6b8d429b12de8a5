//! Task models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskquest_core::economy::TaskReward;
use taskquest_core::task::{TaskCategory, TaskPriority};
use taskquest_core::types::{DbId, Timestamp, Xp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: TaskCategory,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub completed: bool,
    pub xp_value: Xp,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    pub fn to_reward(&self) -> TaskReward {
        TaskReward {
            task_id: self.id,
            owner_id: self.user_id,
            experience_value: self.xp_value,
            completed: self.completed,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a task. `xp_value` defaults from the priority.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[validate(range(min = 1, max = 1000))]
    pub xp_value: Option<Xp>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for partially updating a task.
///
/// No `xp_value`: a task's reward is fixed at creation.
/// Completion changes go through the toggle endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// Optional filters for listing tasks (`?completed=&category=&due=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub category: Option<TaskCategory>,
    pub due: Option<NaiveDate>,
}

/// Completed and total task counts.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TaskCounts {
    pub completed: i64,
    pub total: i64,
}
