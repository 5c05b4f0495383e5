//! API route configuration.
//!
//! Routes are split by authentication: [`public_routes`] take credentials,
//! [`protected_routes`] require a Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_domain_handler, create_lookup_handler, create_url_handler, delete_domain_handler,
    delete_lookup_handler, delete_url_handler, get_domain_handler, get_lookup_handler,
    get_url_handler, list_domains_handler, list_lookups_handler, list_urls_handler,
    login_handler, logout_handler, me_handler, register_handler, update_domain_handler,
    update_lookup_handler, update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Unauthenticated API routes.
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a staff account
/// - `POST /auth/login`    - Exchange credentials for a bearer token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// API routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /auth/logout`            - Revoke the presented token
/// - `GET    /auth/me`                - Current user
/// - `GET    /urls`                   - List visible URLs (paginated, searchable)
/// - `POST   /urls`                   - Create a URL and its sibling
/// - `GET    /urls/{id}`              - Retrieve a URL
/// - `PUT    /urls/{id}`              - Change a URL and rename its sibling
/// - `DELETE /urls/{id}`              - Delete a URL
/// - `GET    /domains`                - List domains (paginated, searchable, `mine`)
/// - `POST   /domains`                - Create a domain
/// - `GET    /domains/{id}`           - Retrieve a domain
/// - `PATCH  /domains/{id}`           - Partially update a domain
/// - `DELETE /domains/{id}`           - Delete a domain
/// - `GET    /lookups/{kind}`         - List subdomains, categories or languages
/// - `POST   /lookups/{kind}`         - Create one
/// - `GET    /lookups/{kind}/{id}`    - Retrieve one
/// - `PUT    /lookups/{kind}/{id}`    - Rename one
/// - `DELETE /lookups/{kind}/{id}`    - Delete one
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/auth/me", get(me_handler))
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route(
            "/urls/{id}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route(
            "/domains",
            get(list_domains_handler).post(create_domain_handler),
        )
        .route(
            "/domains/{id}",
            get(get_domain_handler)
                .patch(update_domain_handler)
                .delete(delete_domain_handler),
        )
        .route(
            "/lookups/{kind}",
            get(list_lookups_handler).post(create_lookup_handler),
        )
        .route(
            "/lookups/{kind}/{id}",
            get(get_lookup_handler)
                .put(update_lookup_handler)
                .delete(delete_lookup_handler),
        )
}
