use axum::routing::{get, post};
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/character`.
///
/// ```text
/// GET  /                        -> get_character
/// POST /stats/{stat}/upgrade    -> upgrade_stat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::get_character))
        .route("/stats/{stat}/upgrade", post(character::upgrade_stat))
}
