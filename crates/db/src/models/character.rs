//! Character stats rows and their economy snapshot.

use serde::Serialize;
use sqlx::FromRow;
use taskquest_core::economy::Character;
use taskquest_core::leveling::{level_progress, LevelProgress};
use taskquest_core::types::{DbId, Timestamp, Xp};

/// A row from the `character_stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterStats {
    pub id: DbId,
    pub user_id: DbId,
    pub xp: Xp,
    pub level: i32,
    pub energy: i32,
    pub focus: i32,
    pub creativity: i32,
    pub health: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CharacterStats {
    /// The economy engine's view of this row.
    pub fn to_character(&self) -> Character {
        Character {
            owner_id: self.user_id,
            experience: self.xp,
            level: self.level,
            energy: self.energy,
            focus: self.focus,
            creativity: self.creativity,
        }
    }
}

/// Character stats plus derived level progress, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    #[serde(flatten)]
    pub stats: CharacterStats,
    pub progress: LevelProgress,
}

impl From<CharacterStats> for CharacterSheet {
    fn from(stats: CharacterStats) -> Self {
        let progress = level_progress(stats.xp);
        Self { stats, progress }
    }
}
