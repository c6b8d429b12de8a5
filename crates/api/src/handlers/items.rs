//! Handlers for the shop catalog and purchases.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskquest_core::error::CoreError;
use taskquest_core::types::DbId;
use taskquest_db::repositories::{EconomyRepo, ItemRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items
///
/// The whole catalog, cheapest first.
pub async fn list_items(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/items/{id}/purchase
///
/// Deduct the item's cost and add it, unequipped, to the caller's inventory.
pub async fn purchase_item(
    user: AuthUser,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = EconomyRepo::purchase_item(&state.pool, user.user_id, item_id).await?;

    tracing::info!(
        user_id = user.user_id,
        item_id,
        xp = outcome.character.xp,
        "Item purchased",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}
