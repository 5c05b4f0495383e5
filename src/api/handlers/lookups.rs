//! Handlers for subdomain, category and language endpoints.
//!
//! The `{kind}` path segment is one of `subdomains`, `categories` or
//! `languages`; anything else is rejected by the `Path` extractor with 400.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::lookup::{LookupItem, LookupRequest};
use crate::api::dto::pagination::{ListResponse, PaginationMeta, PaginationParams};
use crate::domain::entities::{Actor, LookupKind};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/lookups/{kind}`
pub async fn list_lookups_handler(
    Path(kind): Path<LookupKind>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<LookupItem>>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (items, total) = state.lookup_service.list(kind, offset, limit).await?;

    Ok(Json(ListResponse {
        pagination: PaginationMeta::new(&params, total),
        items: items.into_iter().map(LookupItem::from).collect(),
    }))
}

/// `POST /api/lookups/{kind}`
pub async fn create_lookup_handler(
    Path(kind): Path<LookupKind>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<LookupRequest>,
) -> Result<(StatusCode, Json<LookupItem>), AppError> {
    payload.validate()?;

    let lookup = state
        .lookup_service
        .create(kind, &payload.name, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(lookup.into())))
}

/// `GET /api/lookups/{kind}/{id}`
pub async fn get_lookup_handler(
    Path((kind, id)): Path<(LookupKind, i64)>,
    State(state): State<AppState>,
) -> Result<Json<LookupItem>, AppError> {
    let lookup = state.lookup_service.get(kind, id).await?;
    Ok(Json(lookup.into()))
}

/// `PUT /api/lookups/{kind}/{id}`
pub async fn update_lookup_handler(
    Path((kind, id)): Path<(LookupKind, i64)>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<LookupRequest>,
) -> Result<Json<LookupItem>, AppError> {
    payload.validate()?;

    let lookup = state
        .lookup_service
        .update(kind, id, &payload.name, &actor)
        .await?;

    Ok(Json(lookup.into()))
}

/// `DELETE /api/lookups/{kind}/{id}`
///
/// Domains referencing a deleted subdomain keep existing with the link
/// cleared; category and language links are dropped.
pub async fn delete_lookup_handler(
    Path((kind, id)): Path<(LookupKind, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.lookup_service.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
