//! Handlers for the character sheet and stat upgrades.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use taskquest_core::economy::{StatName, STAT_UPGRADE_COST};
use taskquest_db::models::character::CharacterSheet;
use taskquest_db::repositories::{CharacterRepo, EconomyRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/character
///
/// The caller's character with level progress. Created on first access.
pub async fn get_character(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = CharacterRepo::get_or_create(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: CharacterSheet::from(stats),
    }))
}

/// POST /api/v1/character/stats/{stat}/upgrade
///
/// Spend [`STAT_UPGRADE_COST`] XP to raise `energy`, `focus` or `creativity`.
pub async fn upgrade_stat(
    user: AuthUser,
    State(state): State<AppState>,
    Path(stat): Path<String>,
) -> AppResult<impl IntoResponse> {
    let stat: StatName = stat.parse()?;

    let stats = EconomyRepo::upgrade_stat(&state.pool, user.user_id, stat).await?;

    tracing::info!(
        user_id = user.user_id,
        %stat,
        cost = STAT_UPGRADE_COST,
        xp = stats.xp,
        "Stat upgraded",
    );

    Ok(Json(DataResponse {
        data: CharacterSheet::from(stats),
    }))
}
