//! Shop catalog rows.

use serde::Serialize;
use sqlx::FromRow;
use taskquest_core::economy::CatalogItem;
use taskquest_core::item::{ItemRarity, ItemType};
use taskquest_core::types::{DbId, Timestamp, Xp};

/// A row from the `items` table. Read-only at runtime.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub rarity: ItemRarity,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub xp_cost: Xp,
    pub icon: String,
    pub created_at: Timestamp,
}

impl Item {
    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            cost: self.xp_cost,
        }
    }
}
