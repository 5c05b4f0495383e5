//! Static entry guidelines for URLs, subdomains and domains.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::application::services::{domain_service::MAX_ABOUT_LENGTH, url_service::MAX_URL_LENGTH};

#[derive(Template, WebTemplate)]
#[template(path = "guidelines.html")]
struct GuidelinesTemplate {
    max_url_length: usize,
    max_about_length: usize,
}

/// `GET /guidelines`
pub async fn guidelines_handler() -> impl IntoResponse {
    GuidelinesTemplate {
        max_url_length: MAX_URL_LENGTH,
        max_about_length: MAX_ABOUT_LENGTH,
    }
}
