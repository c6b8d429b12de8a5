use crate::types::{DbId, Xp};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested spend exceeds the character's current experience.
    #[error("Insufficient experience: {required} XP required, {available} XP available")]
    InsufficientFunds { required: Xp, available: Xp },

    /// The owner already holds this catalog item.
    #[error("Item {item_id} is already owned")]
    AlreadyOwned { item_id: DbId },

    /// Malformed or cross-owner request.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
