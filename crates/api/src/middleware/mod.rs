//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the owner id from a JWT Bearer token.

pub mod auth;
