use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use taskquest_core::types::DbId;
use taskquest_db::repositories::{EconomyRepo, UserItemRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/inventory
///
/// Owned items joined with their catalog details.
pub async fn list_inventory(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = UserItemRepo::inventory(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/inventory/{item_id}/equip
///
/// Flip the equipped flag. Several items may be equipped at once.
pub async fn toggle_equip(
    user: AuthUser,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let owned = EconomyRepo::toggle_equip(&state.pool, user.user_id, item_id).await?;

    tracing::info!(
        user_id = user.user_id,
        item_id,
        equipped = owned.equipped,
        "Equip toggled",
    );

    Ok(Json(DataResponse { data: owned }))
}
