#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, middleware};
use axum_test::TestServer;
use data_collector::api;
use data_collector::api::middleware::auth;
use data_collector::application::services::{
    AuthService, DomainService, LookupService, ReachabilityService, UrlService,
};
use data_collector::domain::audit::SystemClock;
use data_collector::infrastructure::persistence::{
    PgDomainRepository, PgLookupRepository, PgTokenRepository, PgUrlRepository, PgUserRepository,
};
use data_collector::infrastructure::probe::{ProbeResult, UrlProbe};
use data_collector::state::AppState;
use data_collector::utils::password::hash_password_with;
use data_collector::utils::token::hash_token;
use sqlx::PgPool;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_ITERATIONS: u32 = 1_000;

/// Answers 404 for URLs containing `down.`, 200 otherwise. Sends nothing.
pub struct StubProbe;

#[async_trait]
impl UrlProbe for StubProbe {
    async fn head(&self, url: &str) -> ProbeResult<u16> {
        Ok(if url.contains("down.") { 404 } else { 200 })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let clock = Arc::new(SystemClock);
    let reachability = Arc::new(ReachabilityService::new(Arc::new(StubProbe)));

    let url_service = Arc::new(UrlService::new(
        Arc::new(PgUrlRepository::new(pool.clone())),
        reachability.clone(),
        clock.clone(),
    ));
    let domain_service = Arc::new(DomainService::new(
        Arc::new(PgDomainRepository::new(pool.clone())),
        clock.clone(),
    ));
    let lookup_service = Arc::new(LookupService::new(
        Arc::new(PgLookupRepository::new(pool.clone())),
        clock,
    ));
    let auth_service = Arc::new(
        AuthService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTokenRepository::new(pool.clone())),
            SIGNING_SECRET.to_string(),
            "ada.edu.az".to_string(),
        )
        .with_password_iterations(TEST_ITERATIONS),
    );

    AppState {
        db: pool,
        url_service,
        domain_service,
        lookup_service,
        auth_service,
        reachability,
    }
}

/// API router without rate limiting, mounted at `/api`.
pub fn api_server(pool: PgPool) -> TestServer {
    let state = create_test_state(pool);

    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let app = Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(api::routes::public_routes())
                .merge(protected),
        )
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub async fn create_test_user(pool: &PgPool, email: &str, is_superuser: bool) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (email, first_name, last_name, password_hash, is_staff, is_superuser)
        VALUES ($1, 'Test', 'User', $2, TRUE, $3)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(hash_password_with("s3cret-pass", TEST_ITERATIONS))
    .bind(is_superuser)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Stores a token for `user_id` and returns the raw value.
pub async fn create_test_token(pool: &PgPool, user_id: i64, raw: &str) -> String {
    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, 'test', $2)")
        .bind(user_id)
        .bind(hash_token(SIGNING_SECRET, raw))
        .execute(pool)
        .await
        .unwrap();
    raw.to_string()
}

/// Creates a user with a token; returns `(user_id, token)`.
pub async fn login_as(pool: &PgPool, email: &str, is_superuser: bool) -> (i64, String) {
    let user_id = create_test_user(pool, email, is_superuser).await;
    let token = create_test_token(pool, user_id, &format!("token-{user_id}")).await;
    (user_id, token)
}

pub async fn create_test_url(pool: &PgPool, url: &str, created_by: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO urls (url, created_by) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(created_by)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_lookup(pool: &PgPool, table: &str, label: &str) -> i64 {
    let column = match table {
        "subdomains" => "subdomain",
        "categories" => "category",
        _ => "language",
    };
    sqlx::query_scalar(&format!(
        "INSERT INTO {table} ({column}) VALUES ($1) RETURNING id"
    ))
    .bind(label)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn url_values(pool: &PgPool) -> Vec<String> {
    sqlx::query_scalar("SELECT url FROM urls ORDER BY url")
        .fetch_all(pool)
        .await
        .unwrap()
}
