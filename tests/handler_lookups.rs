mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_lookup_crud(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;

    let response = server
        .post("/api/lookups/categories")
        .authorization_bearer(&token)
        .json(&json!({"name": "  Education "}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Education");
    assert_eq!(body["kind"], "categories");
    assert_eq!(body["created_by"], user_id);
    let id = body["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/lookups/categories/{id}"))
        .authorization_bearer(&token)
        .json(&json!({"name": "Science"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Science");

    let response = server
        .get("/api/lookups/categories")
        .authorization_bearer(&token)
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["items"][0]["name"], "Science");

    server
        .delete(&format!("/api/lookups/categories/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get(&format!("/api/lookups/categories/{id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["message"], "Category not found");
}

#[sqlx::test]
async fn test_kinds_are_separate_tables(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (_, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let id = common::create_test_lookup(&pool, "languages", "English").await;

    server
        .get(&format!("/api/lookups/languages/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_subdomain_format_is_checked(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (_, token) = common::login_as(&pool, "a@ada.edu.az", false).await;

    server
        .post("/api/lookups/subdomains")
        .authorization_bearer(&token)
        .json(&json!({"name": "home,home/gallery"}))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/lookups/subdomains")
        .authorization_bearer(&token)
        .json(&json!({"name": "/home/"}))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "subdomain"
    );
}

#[sqlx::test]
async fn test_unknown_kind_is_rejected(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (_, token) = common::login_as(&pool, "a@ada.edu.az", false).await;

    server
        .get("/api/lookups/colors")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_any_user_may_edit_lookups(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (_, token) = common::login_as(&pool, "b@ada.edu.az", false).await;
    let id = common::create_test_lookup(&pool, "categories", "News").await;

    let response = server
        .put(&format!("/api/lookups/categories/{id}"))
        .authorization_bearer(&token)
        .json(&json!({"name": "Media"}))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["created_by"], Value::Null);
    assert!(body["updated_by"].is_i64());
}
