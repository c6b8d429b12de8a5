//! Handlers for the authenticated user's profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use taskquest_core::error::CoreError;
use taskquest_db::models::profile::UpdateProfile;
use taskquest_db::repositories::ProfileRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/profile
pub async fn get_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/user/profile
///
/// Partially update username and avatar URL.
pub async fn update_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;

    tracing::info!(user_id = user.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}
