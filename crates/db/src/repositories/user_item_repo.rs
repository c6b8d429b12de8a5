//! Repository for the `user_items` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use taskquest_core::economy::OwnedItem;
use taskquest_core::types::DbId;

use crate::models::user_item::{InventoryEntry, UserItem};

/// Column list for `user_items` queries.
const COLUMNS: &str = "id, user_id, item_id, equipped, purchased_at";

/// Unique constraint guaranteeing at-most-once ownership.
pub const UNIQUE_OWNERSHIP_CONSTRAINT: &str = "uq_user_items_user_item";

/// Provides data access for owned items.
pub struct UserItemRepo;

impl UserItemRepo {
    pub async fn list_for_user<'e, E>(executor: E, user_id: DbId) -> Result<Vec<UserItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM user_items WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, UserItem>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Owned items joined with their catalog entries, most recent first.
    pub async fn inventory(pool: &PgPool, user_id: DbId) -> Result<Vec<InventoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, InventoryEntry>(
            "SELECT ui.id, ui.item_id, ui.equipped, ui.purchased_at, \
                    i.name, i.rarity, i.type, i.xp_cost, i.icon \
             FROM user_items ui \
             JOIN items i ON i.id = ui.item_id \
             WHERE ui.user_id = $1 \
             ORDER BY ui.purchased_at DESC, ui.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn insert(conn: &mut PgConnection, owned: &OwnedItem) -> Result<UserItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_items (user_id, item_id, equipped) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserItem>(&query)
            .bind(owned.owner_id)
            .bind(owned.item_id)
            .bind(owned.equipped)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn lock_for_update(
        conn: &mut PgConnection,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<Option<UserItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_items WHERE user_id = $1 AND item_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, UserItem>(&query)
            .bind(user_id)
            .bind(item_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn set_equipped(
        conn: &mut PgConnection,
        id: DbId,
        equipped: bool,
    ) -> Result<UserItem, sqlx::Error> {
        let query =
            format!("UPDATE user_items SET equipped = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserItem>(&query)
            .bind(id)
            .bind(equipped)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn count_for_user<'e, E>(executor: E, user_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_items WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(executor)
            .await
    }
}
