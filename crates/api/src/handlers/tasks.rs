//! Handlers for the `/tasks` resource.
//!
//! Reads and edits are scoped to the caller: another user's task answers
//! 404. Completion goes through the economy so XP is awarded atomically.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskquest_core::error::CoreError;
use taskquest_core::task::{resolve_task_xp, validate_title};
use taskquest_core::types::DbId;
use taskquest_db::models::task::{CreateTask, TaskFilter, UpdateTask};
use taskquest_db::repositories::{EconomyRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks?completed=&category=&due=
pub async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list(&state.pool, user.user_id, &filter).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/tasks
///
/// `xp_value` defaults from the priority (low 25, medium 30, high 50).
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_title(&input.title)?;
    let xp_value = resolve_task_xp(input.priority, input.xp_value)?;

    let task = TaskRepo::create(&state.pool, user.user_id, &input, xp_value).await?;

    tracing::info!(
        user_id = user.user_id,
        task_id = task.id,
        category = %task.category,
        xp_value,
        "Task created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_for_user(&state.pool, user.user_id, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update. The XP value is fixed at creation.
pub async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let task = TaskRepo::update(&state.pool, user.user_id, task_id, &input)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    tracing::info!(user_id = user.user_id, task_id, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}
///
/// Experience already awarded for the task is kept.
pub async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TaskRepo::delete(&state.pool, user.user_id, task_id).await? {
        return Err(task_not_found(task_id));
    }

    tracing::info!(user_id = user.user_id, task_id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/toggle
///
/// Completing awards XP; un-completing keeps it.
pub async fn toggle_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toggle = EconomyRepo::toggle_task(&state.pool, user.user_id, task_id).await?;

    tracing::info!(
        user_id = user.user_id,
        task_id,
        completed = toggle.task.completed,
        xp_awarded = toggle.xp_awarded,
        new_achievements = toggle.new_achievements.len(),
        "Task toggled",
    );

    Ok(Json(DataResponse { data: toggle }))
}

/// POST /api/v1/tasks/{id}/complete
///
/// Like toggle, but an already-completed task is rejected.
pub async fn complete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toggle = EconomyRepo::complete_task(&state.pool, user.user_id, task_id).await?;

    tracing::info!(
        user_id = user.user_id,
        task_id,
        xp_awarded = toggle.xp_awarded,
        level = toggle.character.level,
        "Task completed",
    );

    Ok(Json(DataResponse { data: toggle }))
}
