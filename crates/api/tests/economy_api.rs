//! End-to-end economy flows over HTTP: earning, spending, equipping.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json_auth, register, set_xp};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn item_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM items WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn create_task(app: axum::Router, token: &str, xp: i64) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/tasks",
        token,
        json!({ "title": "Quest", "xp_value": xp }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_earn_then_upgrade(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "e@test.com").await;
    let task = create_task(app.clone(), &token, 120).await;

    let response = post_auth(app.clone(), &format!("/api/v1/tasks/{task}/toggle"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let toggle = body_json(response).await;
    assert_eq!(toggle["data"]["xp_awarded"], 120);
    assert_eq!(toggle["data"]["character"]["level"], 2);
    assert_eq!(toggle["data"]["new_achievements"][0]["key"], "first_quest");

    let response =
        post_auth(app.clone(), "/api/v1/character/stats/energy/upgrade", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let sheet = body_json(response).await;
    assert_eq!(sheet["data"]["xp"], 70);
    assert_eq!(sheet["data"]["level"], 1);
    assert_eq!(sheet["data"]["energy"], 2);
    assert_eq!(sheet["data"]["progress"]["xp_to_next_level"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upgrade_without_xp_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "poor@test.com").await;

    let response = post_auth(app.clone(), "/api/v1/character/stats/focus/upgrade", &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "INSUFFICIENT_FUNDS");

    let sheet = body_json(get_auth(app, "/api/v1/character", &token).await).await;
    assert_eq!(sheet["data"]["focus"], 1);
    assert_eq!(sheet["data"]["xp"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_equip_and_rebuy(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register(app.clone(), "shop@test.com").await;
    set_xp(&pool, user_id, 200).await;
    let hat = item_id(&pool, "Wizard Hat").await;

    let response = post_auth(app.clone(), &format!("/api/v1/items/{hat}/purchase"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let outcome = body_json(response).await;
    assert_eq!(outcome["data"]["character"]["xp"], 50);
    assert_eq!(outcome["data"]["owned"]["equipped"], false);

    let response = post_auth(app.clone(), &format!("/api/v1/items/{hat}/purchase"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "ALREADY_OWNED");

    let response = post_auth(app.clone(), &format!("/api/v1/inventory/{hat}/equip"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["equipped"], true);

    let inventory = body_json(get_auth(app.clone(), "/api/v1/inventory", &token).await).await;
    let entries = inventory["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Wizard Hat");
    assert_eq!(entries[0]["type"], "hat");
    assert_eq!(entries[0]["equipped"], true);

    let sheet = body_json(get_auth(app, "/api/v1/character", &token).await).await;
    assert_eq!(sheet["data"]["xp"], 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_insufficient_funds(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user_id, token) = register(app.clone(), "broke@test.com").await;
    set_xp(&pool, user_id, 100).await;
    let cape = item_id(&pool, "Productivity Cape").await;

    let response = post_auth(app.clone(), &format!("/api/v1/items/{cape}/purchase"), &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let inventory = body_json(get_auth(app, "/api/v1/inventory", &token).await).await;
    assert!(inventory["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_equip_unowned_item_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = register(app.clone(), "eq@test.com").await;
    let mug = item_id(&pool, "Coffee Mug").await;

    let response = post_auth(app, &format!("/api/v1/inventory/{mug}/equip"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_lists_seeded_items(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = register(app.clone(), "cat@test.com").await;

    let catalog = body_json(get_auth(app.clone(), "/api/v1/items", &token).await).await;
    let names: Vec<&str> = catalog["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Focus Glasses"));
    assert!(names.contains(&"Productivity Cape"));

    let glasses = item_id(&pool, "Focus Glasses").await;
    let item = body_json(get_auth(app, &format!("/api/v1/items/{glasses}"), &token).await).await;
    assert_eq!(item["data"]["xp_cost"], 50);
    assert_eq!(item["data"]["rarity"], "common");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uncomplete_keeps_xp_and_complete_rejects_repeat(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "undo@test.com").await;
    let task = create_task(app.clone(), &token, 40).await;

    let response = post_auth(app.clone(), &format!("/api/v1/tasks/{task}/complete"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(app.clone(), &format!("/api/v1/tasks/{task}/complete"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let toggle: Value =
        body_json(post_auth(app.clone(), &format!("/api/v1/tasks/{task}/toggle"), &token).await)
            .await;
    assert_eq!(toggle["data"]["task"]["completed"], false);
    assert_eq!(toggle["data"]["xp_awarded"], 0);

    let sheet = body_json(get_auth(app, "/api/v1/character", &token).await).await;
    assert_eq!(sheet["data"]["xp"], 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_and_achievements(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register(app.clone(), "dash@test.com").await;
    let done = create_task(app.clone(), &token, 30).await;
    create_task(app.clone(), &token, 30).await;
    post_auth(app.clone(), &format!("/api/v1/tasks/{done}/toggle"), &token).await;

    let dashboard = body_json(get_auth(app.clone(), "/api/v1/dashboard", &token).await).await;
    let today = &dashboard["data"]["today"];
    assert_eq!(today["completed"], 1);
    assert_eq!(today["total"], 2);
    assert_eq!(today["percent"], 50);
    assert_eq!(dashboard["data"]["character"]["xp"], 30);

    let achievements = body_json(get_auth(app, "/api/v1/achievements", &token).await).await;
    let rules = achievements["data"].as_array().unwrap();
    assert_eq!(rules.len(), 4);

    let first = rules.iter().find(|r| r["key"] == "first_quest").unwrap();
    assert_eq!(first["unlocked"], true);
    assert_eq!(first["progress"], 100);
    assert!(first["earned_at"].is_string());

    let master = rules.iter().find(|r| r["key"] == "task_master").unwrap();
    assert_eq!(master["unlocked"], false);
    assert_eq!(master["progress"], 1);
}
