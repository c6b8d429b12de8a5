//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the API accepts them

pub mod achievement;
pub mod character;
pub mod item;
pub mod profile;
pub mod task;
pub mod user;
pub mod user_item;
