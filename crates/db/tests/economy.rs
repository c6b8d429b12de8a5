//! Integration tests for the transactional economy operations.
//!
//! Exercises `EconomyRepo` against a real database:
//! - Task completion awards, no clawback on un-completing
//! - Stat upgrades and insufficient funds
//! - Purchases, at-most-once ownership, concurrent spends
//! - Equip toggling and achievement recording

use assert_matches::assert_matches;
use sqlx::PgPool;
use taskquest_core::economy::StatName;
use taskquest_core::error::CoreError;
use taskquest_core::task::{TaskCategory, TaskPriority};
use taskquest_db::error::EconomyError;
use taskquest_db::models::task::CreateTask;
use taskquest_db::models::user::CreateUser;
use taskquest_db::repositories::{
    AchievementRepo, CharacterRepo, EconomyRepo, ItemRepo, TaskRepo, UserItemRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
    };
    let (user, _profile) = UserRepo::register(pool, &input, None).await.unwrap();
    user.id
}

async fn new_task(pool: &PgPool, user_id: i64, xp: i64) -> i64 {
    let dto = CreateTask {
        title: "Complete project proposal".to_string(),
        description: None,
        category: TaskCategory::Work,
        priority: TaskPriority::High,
        xp_value: Some(xp),
        due_date: None,
    };
    TaskRepo::create(pool, user_id, &dto, xp).await.unwrap().id
}

async fn set_xp(pool: &PgPool, user_id: i64, xp: i64) {
    sqlx::query("UPDATE character_stats SET xp = $2, level = $2 / 100 + 1 WHERE user_id = $1")
        .bind(user_id)
        .bind(xp)
        .execute(pool)
        .await
        .unwrap();
}

async fn new_item(pool: &PgPool, name: &str, cost: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO items (name, rarity, type, xp_cost, icon) \
         VALUES ($1, 'common', 'accessory', $2, '🎖️') RETURNING id",
    )
    .bind(name)
    .bind(cost)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn xp_of(pool: &PgPool, user_id: i64) -> i64 {
    CharacterRepo::find_by_user(pool, user_id)
        .await
        .unwrap()
        .unwrap()
        .xp
}

// ---------------------------------------------------------------------------
// Task completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_task_awards_xp_and_level(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let task = new_task(&pool, user, 120).await;

    let toggle = EconomyRepo::toggle_task(&pool, user, task).await.unwrap();

    assert!(toggle.task.completed);
    assert_eq!(toggle.xp_awarded, 120);
    assert_eq!(toggle.character.xp, 120);
    assert_eq!(toggle.character.level, 2);
    assert_eq!(toggle.new_achievements.len(), 1);
    assert_eq!(toggle.new_achievements[0].key, "first_quest");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uncompleting_task_keeps_xp(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let task = new_task(&pool, user, 40).await;

    EconomyRepo::toggle_task(&pool, user, task).await.unwrap();
    let undo = EconomyRepo::toggle_task(&pool, user, task).await.unwrap();

    assert!(!undo.task.completed);
    assert_eq!(undo.xp_awarded, 0);
    assert_eq!(xp_of(&pool, user).await, 40);

    // Earned achievements stay earned.
    let earned = AchievementRepo::list_for_user(&pool, user).await.unwrap();
    assert_eq!(earned.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_task_rejects_already_completed(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let task = new_task(&pool, user, 30).await;

    let first = EconomyRepo::complete_task(&pool, user, task).await.unwrap();
    assert_eq!(first.xp_awarded, 30);

    let err = EconomyRepo::complete_task(&pool, user, task).await.unwrap_err();
    assert_matches!(err, EconomyError::Rejected(CoreError::InvalidOperation(_)));
    assert_eq!(xp_of(&pool, user).await, 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_other_users_task_is_invalid(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com").await;
    let intruder = new_user(&pool, "intruder@test.com").await;
    let task = new_task(&pool, owner, 50).await;

    let err = EconomyRepo::toggle_task(&pool, intruder, task)
        .await
        .unwrap_err();
    assert_matches!(err, EconomyError::Rejected(CoreError::InvalidOperation(_)));

    let row = TaskRepo::find_for_user(&pool, owner, task).await.unwrap().unwrap();
    assert!(!row.completed);
    assert_eq!(xp_of(&pool, intruder).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_missing_task_is_not_found(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let err = EconomyRepo::toggle_task(&pool, user, 999_999).await.unwrap_err();
    assert_matches!(
        err,
        EconomyError::Rejected(CoreError::NotFound { entity: "Task", .. })
    );
}

// ---------------------------------------------------------------------------
// Stat upgrades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upgrade_stat_spends_fifty(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let task = new_task(&pool, user, 120).await;
    EconomyRepo::toggle_task(&pool, user, task).await.unwrap();

    let stats = EconomyRepo::upgrade_stat(&pool, user, StatName::Energy)
        .await
        .unwrap();

    assert_eq!(stats.xp, 70);
    assert_eq!(stats.level, 1);
    assert_eq!(stats.energy, 2);
    assert_eq!(stats.focus, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upgrade_stat_insufficient_funds_is_noop(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 40).await;

    let err = EconomyRepo::upgrade_stat(&pool, user, StatName::Focus)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EconomyError::Rejected(CoreError::InsufficientFunds {
            required: 50,
            available: 40
        })
    );

    let stats = CharacterRepo::find_by_user(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.xp, 40);
    assert_eq!(stats.focus, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_upgrades_cannot_overspend(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 60).await;

    let (a, b) = tokio::join!(
        EconomyRepo::upgrade_stat(&pool, user, StatName::Focus),
        EconomyRepo::upgrade_stat(&pool, user, StatName::Focus),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one upgrade may succeed");

    let failure = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert_matches!(
        failure,
        EconomyError::Rejected(CoreError::InsufficientFunds {
            required: 50,
            available: 10
        })
    );

    let stats = CharacterRepo::find_by_user(&pool, user).await.unwrap().unwrap();
    assert_eq!(stats.xp, 10);
    assert_eq!(stats.to_character().stat(StatName::Focus), 2);
}

// ---------------------------------------------------------------------------
// Purchases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_creates_unequipped_ownership(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 200).await;
    let hat = ItemRepo::find_by_name(&pool, "Wizard Hat").await.unwrap().unwrap();

    let outcome = EconomyRepo::purchase_item(&pool, user, hat.id).await.unwrap();

    assert_eq!(outcome.character.xp, 200 - hat.xp_cost);
    assert_eq!(outcome.owned.item_id, hat.id);
    assert!(!outcome.owned.equipped);

    let inventory = UserItemRepo::inventory(&pool, user).await.unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].name, "Wizard Hat");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_purchase_of_same_item_is_rejected(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 500).await;
    let item = new_item(&pool, "Badge", 50).await;

    EconomyRepo::purchase_item(&pool, user, item).await.unwrap();
    let err = EconomyRepo::purchase_item(&pool, user, item)
        .await
        .unwrap_err();

    assert_matches!(err, EconomyError::Rejected(CoreError::AlreadyOwned { .. }));
    assert_eq!(xp_of(&pool, user).await, 450);
    assert_eq!(UserItemRepo::count_for_user(&pool, user).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_unknown_item_is_not_found(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let err = EconomyRepo::purchase_item(&pool, user, 999_999)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EconomyError::Rejected(CoreError::NotFound { entity: "Item", .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_purchases_cannot_overspend(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 60).await;
    let first = new_item(&pool, "Badge A", 50).await;
    let second = new_item(&pool, "Badge B", 50).await;

    let (a, b) = tokio::join!(
        EconomyRepo::purchase_item(&pool, user, first),
        EconomyRepo::purchase_item(&pool, user, second),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one purchase may succeed");

    let failure = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert_matches!(
        failure,
        EconomyError::Rejected(CoreError::InsufficientFunds { available: 10, .. })
    );

    assert_eq!(xp_of(&pool, user).await, 10);
    assert_eq!(UserItemRepo::count_for_user(&pool, user).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_submitted_purchase_is_owned_once(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    set_xp(&pool, user, 200).await;
    let item = new_item(&pool, "Badge", 50).await;

    let (a, b) = tokio::join!(
        EconomyRepo::purchase_item(&pool, user, item),
        EconomyRepo::purchase_item(&pool, user, item),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one purchase may succeed");

    let failure = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert_matches!(
        failure,
        EconomyError::Rejected(CoreError::AlreadyOwned { item_id }) if item_id == item
    );

    assert_eq!(xp_of(&pool, user).await, 150);
    assert_eq!(UserItemRepo::count_for_user(&pool, user).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Equip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_equip_twice_restores_flag(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let item = new_item(&pool, "Free Badge", 0).await;
    EconomyRepo::purchase_item(&pool, user, item).await.unwrap();

    let on = EconomyRepo::toggle_equip(&pool, user, item).await.unwrap();
    assert!(on.equipped);
    let off = EconomyRepo::toggle_equip(&pool, user, item).await.unwrap();
    assert!(!off.equipped);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_equip_unowned_item_is_not_found(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com").await;
    let other = new_user(&pool, "other@test.com").await;
    let item = new_item(&pool, "Free Badge", 0).await;
    EconomyRepo::purchase_item(&pool, owner, item).await.unwrap();

    let err = EconomyRepo::toggle_equip(&pool, other, item).await.unwrap_err();
    assert_matches!(err, EconomyError::Rejected(CoreError::NotFound { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_multiple_items_can_be_equipped(pool: PgPool) {
    let user = new_user(&pool, "a@test.com").await;
    let a = new_item(&pool, "Hat A", 0).await;
    let b = new_item(&pool, "Hat B", 0).await;
    EconomyRepo::purchase_item(&pool, user, a).await.unwrap();
    EconomyRepo::purchase_item(&pool, user, b).await.unwrap();

    EconomyRepo::toggle_equip(&pool, user, a).await.unwrap();
    EconomyRepo::toggle_equip(&pool, user, b).await.unwrap();

    let owned = UserItemRepo::list_for_user(&pool, user).await.unwrap();
    assert!(owned.iter().all(|o| o.equipped));
}
