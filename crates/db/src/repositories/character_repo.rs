//! Repository for the `character_stats` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use taskquest_core::economy::Character;
use taskquest_core::types::DbId;

use crate::models::character::CharacterStats;

/// Column list for `character_stats` queries.
const COLUMNS: &str = "\
    id, user_id, xp, level, energy, focus, creativity, health, \
    created_at, updated_at";

/// Provides data access for character stats.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Create the character row for `user_id` if it does not exist yet.
    pub async fn ensure<'e, E>(executor: E, user_id: DbId) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO character_stats (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<CharacterStats>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_stats WHERE user_id = $1");
        sqlx::query_as::<_, CharacterStats>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the character, creating it on first use.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<CharacterStats, sqlx::Error> {
        Self::ensure(pool, user_id).await?;
        let query = format!("SELECT {COLUMNS} FROM character_stats WHERE user_id = $1");
        sqlx::query_as::<_, CharacterStats>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Fetch and row-lock the character inside a transaction, creating it on
    /// first use. Every economy write takes this lock first, which serializes
    /// concurrent spends by the same user.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<CharacterStats, sqlx::Error> {
        Self::ensure(&mut *conn, user_id).await?;
        let query =
            format!("SELECT {COLUMNS} FROM character_stats WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, CharacterStats>(&query)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Persist the economy fields of `character`.
    pub async fn save(
        conn: &mut PgConnection,
        character: &Character,
    ) -> Result<CharacterStats, sqlx::Error> {
        let query = format!(
            "UPDATE character_stats SET \
                 xp = $2, level = $3, energy = $4, focus = $5, creativity = $6 \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharacterStats>(&query)
            .bind(character.owner_id)
            .bind(character.experience)
            .bind(character.level)
            .bind(character.energy)
            .bind(character.focus)
            .bind(character.creativity)
            .fetch_one(&mut *conn)
            .await
    }
}
