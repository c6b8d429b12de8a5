pub mod auth;
pub mod character;
pub mod health;
pub mod inventory;
pub mod items;
pub mod profile;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
///
/// /user/profile                      get, update
///
/// /character                         character sheet
/// /character/stats/{stat}/upgrade    spend XP on a stat (POST)
///
/// /tasks                             list, create
/// /tasks/{id}                        get, update, delete
/// /tasks/{id}/toggle                 toggle completion (POST)
/// /tasks/{id}/complete               complete (POST)
///
/// /items                             catalog
/// /items/{id}                        catalog entry
/// /items/{id}/purchase               buy (POST)
///
/// /inventory                         owned items
/// /inventory/{item_id}/equip         toggle equipped (POST)
///
/// /achievements                      rules with progress
/// /dashboard                         daily summary
/// ```
///
/// Everything outside `/auth` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user/profile", profile::router())
        .nest("/character", character::router())
        .nest("/tasks", tasks::router())
        .nest("/items", items::router())
        .nest("/inventory", inventory::router())
        .route(
            "/achievements",
            get(handlers::achievements::list_achievements),
        )
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
}
