mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

struct Fixture {
    url_id: i64,
    subdomain_id: i64,
    category_id: i64,
    language_id: i64,
}

async fn fixture(pool: &PgPool, user_id: i64) -> Fixture {
    Fixture {
        url_id: common::create_test_url(pool, "https://ada.edu.az", user_id).await,
        subdomain_id: common::create_test_lookup(pool, "subdomains", "home/news").await,
        category_id: common::create_test_lookup(pool, "categories", "Education").await,
        language_id: common::create_test_lookup(pool, "languages", "Azerbaijani").await,
    }
}

fn body_for(f: &Fixture) -> Value {
    json!({
        "about": "University portal",
        "url_id": f.url_id,
        "subdomain_id": f.subdomain_id,
        "category_ids": [f.category_id],
        "language_ids": [f.language_id],
    })
}

async fn create_domain(server: &axum_test::TestServer, token: &str, body: &Value) -> i64 {
    let response = server
        .post("/api/domains")
        .authorization_bearer(token)
        .json(body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[sqlx::test]
async fn test_create_domain(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;

    let response = server
        .post("/api/domains")
        .authorization_bearer(&token)
        .json(&body_for(&f))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["about"], "University portal");
    assert_eq!(body["url"], "https://ada.edu.az");
    assert_eq!(body["subdomain_id"], f.subdomain_id);
    assert_eq!(body["category_ids"], json!([f.category_id]));
    assert_eq!(body["language_ids"], json!([f.language_id]));
    assert_eq!(body["created_by"], user_id);
}

#[sqlx::test]
async fn test_create_domain_requires_categories(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;

    let mut body = body_for(&f);
    body["category_ids"] = json!([]);

    let response = server
        .post("/api/domains")
        .authorization_bearer(&token)
        .json(&body)
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_create_domain_rejects_long_about(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;

    let mut body = body_for(&f);
    body["about"] = json!("x".repeat(1001));

    server
        .post("/api/domains")
        .authorization_bearer(&token)
        .json(&body)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_domain_unknown_category(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;

    let mut body = body_for(&f);
    body["category_ids"] = json!([999_999]);

    let response = server
        .post("/api/domains")
        .authorization_bearer(&token)
        .json(&body)
        .await;

    response.assert_status_bad_request();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domains")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_create_domain_url_used_twice(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;

    create_domain(&server, &token, &body_for(&f)).await;

    server
        .post("/api/domains")
        .authorization_bearer(&token)
        .json(&body_for(&f))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_patch_null_clears_url(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;
    let id = create_domain(&server, &token, &body_for(&f)).await;

    let response = server
        .patch(&format!("/api/domains/{id}"))
        .authorization_bearer(&token)
        .json(&json!({"url_id": null, "about": "Admissions"}))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["url_id"], Value::Null);
    assert_eq!(body["about"], "Admissions");
    // Absent fields are left alone.
    assert_eq!(body["subdomain_id"], f.subdomain_id);
    assert_eq!(body["category_ids"], json!([f.category_id]));
}

#[sqlx::test]
async fn test_patch_replaces_sets(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;
    let id = create_domain(&server, &token, &body_for(&f)).await;
    let english = common::create_test_lookup(&pool, "languages", "English").await;

    let response = server
        .patch(&format!("/api/domains/{id}"))
        .authorization_bearer(&token)
        .json(&json!({"language_ids": [english, f.language_id, english]}))
        .await;

    response.assert_status_ok();
    let mut expected = vec![f.language_id, english];
    expected.sort_unstable();
    assert_eq!(response.json::<Value>()["language_ids"], json!(expected));
}

#[sqlx::test]
async fn test_patch_by_non_owner_is_forbidden(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let (_, other_token) = common::login_as(&pool, "b@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;
    let id = create_domain(&server, &token, &body_for(&f)).await;

    let response = server
        .patch(&format!("/api/domains/{id}"))
        .authorization_bearer(&other_token)
        .json(&json!({"about": "Hijacked"}))
        .await;

    response.assert_status_forbidden();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["kind"],
        "not_owner"
    );

    let about: String = sqlx::query_scalar("SELECT about FROM domains WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(about, "University portal");
}

#[sqlx::test]
async fn test_superuser_can_delete_any_domain(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let (_, admin_token) = common::login_as(&pool, "root@ada.edu.az", true).await;
    let f = fixture(&pool, user_id).await;
    let id = create_domain(&server, &token, &body_for(&f)).await;

    server
        .delete(&format!("/api/domains/{id}"))
        .authorization_bearer(&admin_token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/domains/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_list_visible_to_all_and_mine_filter(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (a_id, a_token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let (_, b_token) = common::login_as(&pool, "b@ada.edu.az", false).await;
    let f = fixture(&pool, a_id).await;
    create_domain(&server, &a_token, &body_for(&f)).await;

    let response = server
        .get("/api/domains")
        .authorization_bearer(&b_token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["pagination"]["total_items"], 1);

    let response = server
        .get("/api/domains")
        .add_query_param("mine", "true")
        .authorization_bearer(&b_token)
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["pagination"]["total_items"], 0);
    assert_eq!(body["items"], json!([]));
}

#[sqlx::test]
async fn test_list_search_matches_url(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;
    create_domain(&server, &token, &body_for(&f)).await;

    let hit = server
        .get("/api/domains")
        .add_query_param("search", "EDU.AZ")
        .authorization_bearer(&token)
        .await;
    assert_eq!(hit.json::<Value>()["pagination"]["total_items"], 1);

    let miss = server
        .get("/api/domains")
        .add_query_param("search", "%")
        .authorization_bearer(&token)
        .await;
    assert_eq!(miss.json::<Value>()["pagination"]["total_items"], 0);
}

#[sqlx::test]
async fn test_deleting_url_orphans_domain(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (user_id, token) = common::login_as(&pool, "a@ada.edu.az", false).await;
    let f = fixture(&pool, user_id).await;
    let id = create_domain(&server, &token, &body_for(&f)).await;

    server
        .delete(&format!("/api/urls/{}", f.url_id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get(&format!("/api/domains/{id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["url_id"], Value::Null);
    assert_eq!(body["url"], Value::Null);
}
