//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`                 - Health check: database, probe (public)
//! - `POST /api/auth/{register,login}` - Account endpoints (public)
//! - `/api/*`                       - REST API (Bearer token required)
//! - `/register`, `/guidelines`     - Web pages (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter for the API
//! - **Authentication** - Bearer token on protected API routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected_api = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public_api = api::routes::public_routes().layer(rate_limit::layer());

    let web_router = web::routes::public_routes().layer(rate_limit::layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", Router::new().merge(public_api).merge(protected_api))
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
