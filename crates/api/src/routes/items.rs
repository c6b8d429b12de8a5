use axum::routing::{get, post};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET  /                -> list_items
/// GET  /{id}            -> get_item
/// POST /{id}/purchase   -> purchase_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/{id}", get(items::get_item))
        .route("/{id}/purchase", post(items::purchase_item))
}
