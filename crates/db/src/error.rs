use taskquest_core::error::CoreError;

/// Failure of a transactional economy operation.
///
/// `Rejected` carries the economy rule that refused the action; the
/// transaction was rolled back and nothing was written.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EconomyResult<T> = Result<T, EconomyError>;
