//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a connection inside a transaction) as the first
//! argument.

pub mod achievement_repo;
pub mod character_repo;
pub mod economy_repo;
pub mod item_repo;
pub mod profile_repo;
pub mod task_repo;
pub mod user_item_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use character_repo::CharacterRepo;
pub use economy_repo::EconomyRepo;
pub use item_repo::ItemRepo;
pub use profile_repo::ProfileRepo;
pub use task_repo::TaskRepo;
pub use user_item_repo::UserItemRepo;
pub use user_repo::UserRepo;
