use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET  /                   -> list_inventory
/// POST /{item_id}/equip    -> toggle_equip
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list_inventory))
        .route("/{item_id}/equip", post(inventory::toggle_equip))
}
