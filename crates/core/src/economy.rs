//! Experience economy rules.
//!
//! Every operation is a total function from a snapshot plus a request to
//! either the next snapshot or a [`CoreError`] rejection. Inputs are taken by
//! reference and never mutated, so a rejection leaves nothing to undo. The
//! caller is responsible for applying the returned state atomically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::leveling::compute_level;
use crate::types::{DbId, Xp};

/// Flat cost of one stat upgrade, independent of the stat's current level.
pub const STAT_UPGRADE_COST: Xp = 50;

/// Starting level of every upgradeable stat.
pub const BASE_STAT_LEVEL: i32 = 1;

/// Upgradeable character stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    Energy,
    Focus,
    Creativity,
}

impl StatName {
    pub const ALL: [StatName; 3] = [StatName::Energy, StatName::Focus, StatName::Creativity];

    pub fn as_str(self) -> &'static str {
        match self {
            StatName::Energy => "energy",
            StatName::Focus => "focus",
            StatName::Creativity => "creativity",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatName::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidOperation(format!(
                    "Unknown stat '{s}'. Must be one of: energy, focus, creativity"
                ))
            })
    }
}

/// Snapshot of a character's economy-relevant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub owner_id: DbId,
    pub experience: Xp,
    pub level: i32,
    pub energy: i32,
    pub focus: i32,
    pub creativity: i32,
}

impl Character {
    /// A freshly created character: no experience, level 1, base stats.
    pub fn new(owner_id: DbId) -> Self {
        Self {
            owner_id,
            experience: 0,
            level: 1,
            energy: BASE_STAT_LEVEL,
            focus: BASE_STAT_LEVEL,
            creativity: BASE_STAT_LEVEL,
        }
    }

    pub fn stat(&self, stat: StatName) -> i32 {
        match stat {
            StatName::Energy => self.energy,
            StatName::Focus => self.focus,
            StatName::Creativity => self.creativity,
        }
    }

    fn stat_mut(&mut self, stat: StatName) -> &mut i32 {
        match stat {
            StatName::Energy => &mut self.energy,
            StatName::Focus => &mut self.focus,
            StatName::Creativity => &mut self.creativity,
        }
    }

    fn with_experience(&self, experience: Xp) -> Self {
        Self {
            experience,
            level: compute_level(experience),
            ..self.clone()
        }
    }

    fn spend(&self, cost: Xp) -> Result<Self, CoreError> {
        if cost < 0 {
            return Err(CoreError::InvalidOperation(format!(
                "Cost must not be negative, got {cost}"
            )));
        }
        if self.experience < cost {
            return Err(CoreError::InsufficientFunds {
                required: cost,
                available: self.experience,
            });
        }
        Ok(self.with_experience(self.experience - cost))
    }
}

/// The fields of a task the economy needs to award it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReward {
    pub task_id: DbId,
    pub owner_id: DbId,
    pub experience_value: Xp,
    /// Completion flag before the requested transition.
    pub completed: bool,
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: DbId,
    pub cost: Xp,
}

/// A (owner, item) ownership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnedItem {
    pub owner_id: DbId,
    pub item_id: DbId,
    pub equipped: bool,
}

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub character: Character,
    pub owned: OwnedItem,
}

/// Award a task's experience as it transitions to completed.
pub fn award_task_completion(
    character: &Character,
    task: &TaskReward,
) -> Result<Character, CoreError> {
    if task.owner_id != character.owner_id {
        return Err(CoreError::InvalidOperation(format!(
            "Task {} does not belong to this user",
            task.task_id
        )));
    }
    if task.completed {
        return Err(CoreError::InvalidOperation(format!(
            "Task {} is already completed",
            task.task_id
        )));
    }
    if task.experience_value < 0 {
        return Err(CoreError::InvalidOperation(format!(
            "Task {} has a negative experience value",
            task.task_id
        )));
    }

    let experience = character
        .experience
        .checked_add(task.experience_value)
        .ok_or_else(|| CoreError::InvalidOperation("Experience balance overflow".into()))?;

    Ok(character.with_experience(experience))
}

/// Spend `cost` experience to raise `stat` by one level.
pub fn upgrade_stat(character: &Character, stat: StatName, cost: Xp) -> Result<Character, CoreError> {
    let mut next = character.spend(cost)?;
    let value = next.stat_mut(stat);
    *value = value
        .checked_add(1)
        .ok_or_else(|| CoreError::InvalidOperation(format!("{stat} is at its maximum")))?;
    Ok(next)
}

/// Buy `item`, given everything the owner already holds.
///
/// Ownership is checked before funds so that re-buying an owned item is
/// reported as such even when the balance is also short.
pub fn purchase_item(
    character: &Character,
    item: &CatalogItem,
    owned: &[OwnedItem],
) -> Result<Purchase, CoreError> {
    if owned.iter().any(|o| o.owner_id != character.owner_id) {
        return Err(CoreError::InvalidOperation(
            "Inventory contains items of another user".into(),
        ));
    }
    if owned.iter().any(|o| o.item_id == item.id) {
        return Err(CoreError::AlreadyOwned { item_id: item.id });
    }

    let character = character.spend(item.cost)?;
    let owned = OwnedItem {
        owner_id: character.owner_id,
        item_id: item.id,
        equipped: false,
    };
    Ok(Purchase { character, owned })
}

/// Flip the equipped flag. Any number of items may be equipped at once.
pub fn toggle_equip(owned: &OwnedItem) -> OwnedItem {
    OwnedItem {
        equipped: !owned.equipped,
        ..*owned
    }
}

/// [`toggle_equip`] on behalf of `owner_id`, rejecting other users' items.
pub fn toggle_equip_for(owner_id: DbId, owned: &OwnedItem) -> Result<OwnedItem, CoreError> {
    if owned.owner_id != owner_id {
        return Err(CoreError::InvalidOperation(format!(
            "Item {} is not owned by this user",
            owned.item_id
        )));
    }
    Ok(toggle_equip(owned))
}
