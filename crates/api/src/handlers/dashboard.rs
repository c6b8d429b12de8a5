//! Handler for the daily dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskquest_core::dashboard::{task_progress, TaskProgress};
use taskquest_db::models::character::CharacterSheet;
use taskquest_db::repositories::{CharacterRepo, TaskRepo};

use crate::error::AppResult;
use crate::handlers::achievements::{achievement_views, AchievementView};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    /// Tasks due today or without a due date.
    pub today: TaskProgress,
    pub character: CharacterSheet,
    pub achievements: Vec<AchievementView>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = chrono::Utc::now().date_naive();

    let counts = TaskRepo::counts_for_day(&state.pool, user.user_id, today).await?;
    let stats = CharacterRepo::get_or_create(&state.pool, user.user_id).await?;
    let achievements = achievement_views(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            today: task_progress(counts.completed, counts.total),
            character: CharacterSheet::from(stats),
            achievements,
        },
    }))
}
