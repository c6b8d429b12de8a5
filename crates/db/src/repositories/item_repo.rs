//! Repository for the read-only `items` catalog.

use sqlx::{PgExecutor, PgPool};
use taskquest_core::types::DbId;

use crate::models::item::Item;

/// Column list for `items` queries.
const COLUMNS: &str = "id, name, rarity, type, xp_cost, icon, created_at";

/// Provides read access to the shop catalog.
pub struct ItemRepo;

impl ItemRepo {
    /// List the catalog, cheapest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY xp_cost, name");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE name = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
