use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskquest_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial profile update. Omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}
