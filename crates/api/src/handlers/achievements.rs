//! Handlers for achievements.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskquest_core::achievement::{self, AchievementProgress};
use taskquest_core::types::{DbId, Timestamp};
use taskquest_db::models::achievement::Achievement;
use taskquest_db::repositories::{AchievementRepo, CharacterRepo};
use taskquest_db::DbPool;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One rule with the caller's progress toward it.
///
/// `unlocked` stays true once earned, even if the counters later drop.
#[derive(Debug, Serialize)]
pub struct AchievementView {
    #[serde(flatten)]
    pub progress: AchievementProgress,
    pub earned_at: Option<Timestamp>,
}

/// Evaluate every rule for `user_id`, merged with the earned rows.
pub(crate) async fn achievement_views(
    pool: &DbPool,
    user_id: DbId,
) -> AppResult<Vec<AchievementView>> {
    let stats = CharacterRepo::get_or_create(pool, user_id).await?;
    let earned = AchievementRepo::list_for_user(pool, user_id).await?;

    let mut conn = pool.acquire().await?;
    let counters = AchievementRepo::counters(&mut conn, user_id, stats.level).await?;

    Ok(merge_earned(achievement::evaluate(&counters), &earned))
}

fn merge_earned(progress: Vec<AchievementProgress>, earned: &[Achievement]) -> Vec<AchievementView> {
    progress
        .into_iter()
        .map(|mut p| {
            let earned_at = earned.iter().find(|a| a.key == p.key).map(|a| a.earned_at);
            if earned_at.is_some() {
                p.unlocked = true;
            }
            AchievementView {
                progress: p,
                earned_at,
            }
        })
        .collect()
}

/// GET /api/v1/achievements
pub async fn list_achievements(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let views = achievement_views(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: views }))
}
