//! Repository for the `users` table.

use sqlx::PgPool;
use taskquest_core::types::DbId;

use crate::models::profile::Profile;
use crate::models::user::{CreateUser, User};
use crate::repositories::{CharacterRepo, ProfileRepo};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Provides data access for login credentials.
pub struct UserRepo;

impl UserRepo {
    /// Create a user together with its profile and character row.
    ///
    /// All three inserts share one transaction, so a duplicate email
    /// (`uq_users_email`) leaves nothing behind.
    pub async fn register(
        pool: &PgPool,
        input: &CreateUser,
        username: Option<&str>,
    ) -> Result<(User, Profile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let profile = ProfileRepo::create(&mut *tx, user.id, username).await?;
        CharacterRepo::ensure(&mut *tx, user.id).await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    /// Find a user by email (case-sensitive; emails are lowercased on input).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
