//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{guidelines_handler, register_page_handler, register_submit_handler};
use axum::{Router, routing::get};

/// Public web pages. None require authentication.
///
/// # Endpoints
///
/// - `GET  /register`   - Registration form
/// - `POST /register`   - Submit registration
/// - `GET  /guidelines` - Entry guidelines
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            get(register_page_handler).post(register_submit_handler),
        )
        .route("/guidelines", get(guidelines_handler))
}
