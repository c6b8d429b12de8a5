//! Request handlers, one submodule per resource.
//!
//! Handlers take an [`crate::middleware::auth::AuthUser`] where the route is
//! private, delegate to the repositories in `taskquest_db`, and map errors
//! via [`crate::error::AppError`].

pub mod achievements;
pub mod auth;
pub mod character;
pub mod dashboard;
pub mod inventory;
pub mod items;
pub mod profile;
pub mod tasks;
