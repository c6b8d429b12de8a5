//! Ownership records and the inventory view joined with the catalog.

use serde::Serialize;
use sqlx::FromRow;
use taskquest_core::economy::OwnedItem;
use taskquest_core::item::{ItemRarity, ItemType};
use taskquest_core::types::{DbId, Timestamp, Xp};

/// A row from the `user_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserItem {
    pub id: DbId,
    pub user_id: DbId,
    pub item_id: DbId,
    pub equipped: bool,
    pub purchased_at: Timestamp,
}

impl UserItem {
    pub fn to_owned_item(&self) -> OwnedItem {
        OwnedItem {
            owner_id: self.user_id,
            item_id: self.item_id,
            equipped: self.equipped,
        }
    }
}

/// An owned item with its catalog details, for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryEntry {
    pub id: DbId,
    pub item_id: DbId,
    pub equipped: bool,
    pub purchased_at: Timestamp,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub rarity: ItemRarity,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub xp_cost: Xp,
    pub icon: String,
}
