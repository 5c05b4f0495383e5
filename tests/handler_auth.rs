mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

fn registration(email: &str) -> Value {
    json!({
        "first_name": "Aysel",
        "last_name": "Mammadova",
        "email": email,
        "password1": "long-enough-pass",
        "password2": "long-enough-pass",
    })
}

#[sqlx::test]
async fn test_register_creates_staff_user(pool: PgPool) {
    let server = common::api_server(pool.clone());

    let response = server
        .post("/api/auth/register")
        .json(&registration("Aysel@ADA.edu.az"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["email"], "aysel@ada.edu.az");
    assert_eq!(body["is_staff"], true);
    assert_eq!(body["is_superuser"], false);
    assert!(body.get("password_hash").is_none());
}

#[sqlx::test]
async fn test_register_accepts_subdomain_of_allowed_domain(pool: PgPool) {
    let server = common::api_server(pool);

    server
        .post("/api/auth/register")
        .json(&registration("aysel@students.ada.edu.az"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[sqlx::test]
async fn test_register_rejects_foreign_domain(pool: PgPool) {
    let server = common::api_server(pool.clone());

    let response = server
        .post("/api/auth/register")
        .json(&registration("aysel@gmail.com"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Emails ending with ada.edu.az are only accepted."
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_register_duplicate_email(pool: PgPool) {
    let server = common::api_server(pool.clone());
    common::create_test_user(&pool, "aysel@ada.edu.az", false).await;

    server
        .post("/api/auth/register")
        .json(&registration("aysel@ada.edu.az"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_register_password_mismatch(pool: PgPool) {
    let server = common::api_server(pool);
    let mut body = registration("aysel@ada.edu.az");
    body["password2"] = json!("something-else");

    let response = server.post("/api/auth/register").json(&body).await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "The two password fields didn't match."
    );
}

#[sqlx::test]
async fn test_login_token_authenticates(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let user_id = common::create_test_user(&pool, "a@ada.edu.az", false).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "A@ada.edu.az", "password": "s3cret-pass"}))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["user"]["id"], user_id);
    let token = body["token"].as_str().unwrap().to_string();

    let me = server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["email"], "a@ada.edu.az");
}

#[sqlx::test]
async fn test_login_wrong_password(pool: PgPool) {
    let server = common::api_server(pool.clone());
    common::create_test_user(&pool, "a@ada.edu.az", false).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "a@ada.edu.az", "password": "wrong-pass"}))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[sqlx::test]
async fn test_logout_revokes_token(pool: PgPool) {
    let server = common::api_server(pool.clone());
    let (_, token) = common::login_as(&pool, "a@ada.edu.az", false).await;

    server
        .post("/api/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_unknown_token_is_rejected(pool: PgPool) {
    let server = common::api_server(pool);

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not-a-token")
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}
