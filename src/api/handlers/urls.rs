//! Handlers for URL endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{ListQueryParams, ListResponse, PaginationMeta};
use crate::api::dto::url::{CreateUrlResponse, UrlItem, UrlRequest};
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Lists URLs visible to the caller, ordered by URL.
///
/// # Endpoint
///
/// `GET /api/urls?page=&page_size=&search=`
///
/// Superusers see every URL; other users see the ones they created.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<ListResponse<UrlItem>>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (items, total) = state
        .url_service
        .list_urls(&actor, params.search, offset, limit)
        .await?;

    Ok(Json(ListResponse {
        pagination: PaginationMeta::new(&params.pagination, total),
        items: items.into_iter().map(UrlItem::from).collect(),
    }))
}

/// Creates a URL together with its `www.` sibling.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Errors
///
/// Returns 400 with `details.kind` set to `invalid_url_syntax`,
/// `url_unreachable`, `malformed_url` or `url_too_long`.
/// Returns 409 if either value is already stored.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    payload.validate()?;

    let (url, sibling) = state.url_service.create_url(payload.url, &actor).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            url: url.into(),
            sibling: sibling.into(),
        }),
    ))
}

/// Retrieves a URL.
///
/// # Endpoint
///
/// `GET /api/urls/{id}`
///
/// # Errors
///
/// Returns 404 if the URL does not exist or is not visible to the caller.
pub async fn get_url_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<UrlItem>, AppError> {
    let url = state.url_service.get_url(id, &actor).await?;
    Ok(Json(url.into()))
}

/// Changes a URL and renames its sibling to match.
///
/// # Endpoint
///
/// `PUT /api/urls/{id}`
///
/// # Errors
///
/// Returns 400 if the new URL fails validation.
/// Returns 403 with `details.kind = "not_owner"` if the caller did not
/// create the URL and is not a superuser.
/// Returns 404 if the URL does not exist.
/// Returns 409 if a renamed value is already stored.
pub async fn update_url_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UrlRequest>,
) -> Result<Json<UrlItem>, AppError> {
    payload.validate()?;

    let url = state.url_service.update_url(id, payload.url, &actor).await?;
    Ok(Json(url.into()))
}

/// Deletes a URL. The sibling is kept.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Errors
///
/// Returns 403 if the caller did not create the URL and is not a superuser.
/// Returns 404 if the URL does not exist.
pub async fn delete_url_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<StatusCode, AppError> {
    state.url_service.delete_url(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
