//! Transactional economy operations.
//!
//! Each method opens one transaction, row-locks the user's character first
//! (then any task or ownership row it touches), asks
//! [`taskquest_core::economy`] for the next state, writes it, and commits.
//! A rejection returns early and the transaction is dropped, which rolls it
//! back. Concurrent spends by one user therefore queue on the character lock
//! and each sees the balance left by the previous one.

use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use taskquest_core::economy::{self, StatName, STAT_UPGRADE_COST};
use taskquest_core::error::CoreError;
use taskquest_core::types::{DbId, Xp};

use crate::error::EconomyResult;
use crate::models::achievement::Achievement;
use crate::models::character::CharacterStats;
use crate::models::task::Task;
use crate::models::user_item::UserItem;
use crate::repositories::user_item_repo::UNIQUE_OWNERSHIP_CONSTRAINT;
use crate::repositories::{AchievementRepo, CharacterRepo, ItemRepo, TaskRepo, UserItemRepo};

/// Outcome of toggling a task's completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct TaskToggle {
    pub task: Task,
    pub character: CharacterStats,
    /// Experience granted by this toggle; 0 when un-completing.
    pub xp_awarded: Xp,
    pub new_achievements: Vec<Achievement>,
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOutcome {
    pub owned: UserItem,
    pub character: CharacterStats,
    pub new_achievements: Vec<Achievement>,
}

/// Runs economy operations against the record store.
pub struct EconomyRepo;

impl EconomyRepo {
    /// Mark a pending task completed and award its experience.
    ///
    /// An already-completed task is rejected with `InvalidOperation`.
    pub async fn complete_task(
        pool: &PgPool,
        user_id: DbId,
        task_id: DbId,
    ) -> EconomyResult<TaskToggle> {
        let mut tx = pool.begin().await?;

        let stats = CharacterRepo::lock_for_update(&mut tx, user_id).await?;
        let task = lock_owned_task(&mut tx, user_id, task_id).await?;
        let toggle = award(&mut tx, &stats, &task).await?;

        tx.commit().await?;
        Ok(toggle)
    }

    /// Flip a task's completion flag.
    ///
    /// Completing awards the task's experience. Un-completing keeps the
    /// experience already awarded; completing again awards it again.
    pub async fn toggle_task(
        pool: &PgPool,
        user_id: DbId,
        task_id: DbId,
    ) -> EconomyResult<TaskToggle> {
        let mut tx = pool.begin().await?;

        let stats = CharacterRepo::lock_for_update(&mut tx, user_id).await?;
        let task = lock_owned_task(&mut tx, user_id, task_id).await?;

        let toggle = if task.completed {
            let task = TaskRepo::set_completed(&mut tx, task_id, false).await?;
            TaskToggle {
                task,
                character: stats,
                xp_awarded: 0,
                new_achievements: Vec::new(),
            }
        } else {
            award(&mut tx, &stats, &task).await?
        };

        tx.commit().await?;
        Ok(toggle)
    }

    /// Spend [`STAT_UPGRADE_COST`] experience to raise one stat.
    pub async fn upgrade_stat(
        pool: &PgPool,
        user_id: DbId,
        stat: StatName,
    ) -> EconomyResult<CharacterStats> {
        let mut tx = pool.begin().await?;

        let stats = CharacterRepo::lock_for_update(&mut tx, user_id).await?;
        let next = economy::upgrade_stat(&stats.to_character(), stat, STAT_UPGRADE_COST)?;
        let character = CharacterRepo::save(&mut tx, &next).await?;

        tx.commit().await?;

        tracing::debug!(
            user_id,
            %stat,
            value = next.stat(stat),
            xp = character.xp,
            "Stat upgraded",
        );
        Ok(character)
    }

    /// Buy a catalog item: deduct its cost and create the ownership record
    /// in the same transaction.
    pub async fn purchase_item(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
    ) -> EconomyResult<PurchaseOutcome> {
        let mut tx = pool.begin().await?;

        let stats = CharacterRepo::lock_for_update(&mut tx, user_id).await?;
        let item = ItemRepo::find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: item_id,
            })?;
        let owned: Vec<_> = UserItemRepo::list_for_user(&mut *tx, user_id)
            .await?
            .iter()
            .map(UserItem::to_owned_item)
            .collect();

        let purchase =
            economy::purchase_item(&stats.to_character(), &item.to_catalog_item(), &owned)?;

        let character = CharacterRepo::save(&mut tx, &purchase.character).await?;
        let owned = match UserItemRepo::insert(&mut tx, &purchase.owned).await {
            Ok(row) => row,
            Err(err) if is_unique_violation(&err, UNIQUE_OWNERSHIP_CONSTRAINT) => {
                return Err(CoreError::AlreadyOwned { item_id }.into());
            }
            Err(err) => return Err(err.into()),
        };
        let new_achievements =
            AchievementRepo::record_unlocked(&mut tx, user_id, character.level).await?;

        tx.commit().await?;

        tracing::debug!(user_id, item_id, xp = character.xp, "Item purchased");
        Ok(PurchaseOutcome {
            owned,
            character,
            new_achievements,
        })
    }

    /// Flip the equipped flag of an item the user owns.
    pub async fn toggle_equip(pool: &PgPool, user_id: DbId, item_id: DbId) -> EconomyResult<UserItem> {
        let mut tx = pool.begin().await?;

        let row = UserItemRepo::lock_for_update(&mut tx, user_id, item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "OwnedItem",
                id: item_id,
            })?;
        let next = economy::toggle_equip_for(user_id, &row.to_owned_item())?;
        let row = UserItemRepo::set_equipped(&mut tx, row.id, next.equipped).await?;

        tx.commit().await?;
        Ok(row)
    }
}

/// Row-lock a task and check it belongs to `user_id`.
async fn lock_owned_task(
    conn: &mut PgConnection,
    user_id: DbId,
    task_id: DbId,
) -> EconomyResult<Task> {
    let task = TaskRepo::lock_for_update(conn, task_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        })?;

    if task.user_id != user_id {
        return Err(CoreError::InvalidOperation(format!(
            "Task {task_id} does not belong to this user"
        ))
        .into());
    }
    Ok(task)
}

/// Award a pending task: credit the character, flag the task, record
/// achievements. Runs inside the caller's transaction.
async fn award(
    conn: &mut PgConnection,
    stats: &CharacterStats,
    task: &Task,
) -> EconomyResult<TaskToggle> {
    let next = economy::award_task_completion(&stats.to_character(), &task.to_reward())?;
    let character = CharacterRepo::save(&mut *conn, &next).await?;
    let task = TaskRepo::set_completed(&mut *conn, task.id, true).await?;
    let new_achievements =
        AchievementRepo::record_unlocked(&mut *conn, stats.user_id, character.level).await?;

    tracing::debug!(
        user_id = stats.user_id,
        task_id = task.id,
        xp = character.xp,
        level = character.level,
        "Task completion awarded",
    );

    Ok(TaskToggle {
        xp_awarded: task.xp_value,
        task,
        character,
        new_achievements,
    })
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
