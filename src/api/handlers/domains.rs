//! Handlers for domain management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::domain::{CreateDomainRequest, DomainItem, UpdateDomainRequest};
use crate::api::dto::pagination::{ListQueryParams, ListResponse, PaginationMeta};
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Lists domains ordered by their linked URL.
///
/// # Endpoint
///
/// `GET /api/domains?page=&page_size=&search=&mine=`
///
/// Every authenticated user sees all domains. `mine=true` narrows the list
/// to the caller's own records; `search` matches the linked URL.
pub async fn list_domains_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<ListResponse<DomainItem>>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (items, total) = state
        .domain_service
        .list_domains(
            &actor,
            params.mine.unwrap_or(false),
            params.search,
            offset,
            limit,
        )
        .await?;

    Ok(Json(ListResponse {
        pagination: PaginationMeta::new(&params.pagination, total),
        items: items.into_iter().map(DomainItem::from).collect(),
    }))
}

/// Creates a domain.
///
/// # Endpoint
///
/// `POST /api/domains`
///
/// # Errors
///
/// Returns 400 if a field is invalid or a referenced record does not exist.
/// Returns 409 if the URL already backs another domain.
pub async fn create_domain_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateDomainRequest>,
) -> Result<(StatusCode, Json<DomainItem>), AppError> {
    payload.validate()?;

    let domain = state
        .domain_service
        .create_domain(payload.into(), &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(domain.into())))
}

/// Retrieves a domain.
///
/// # Endpoint
///
/// `GET /api/domains/{id}`
pub async fn get_domain_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DomainItem>, AppError> {
    let domain = state.domain_service.get_domain(id).await?;
    Ok(Json(domain.into()))
}

/// Partially updates a domain.
///
/// # Endpoint
///
/// `PATCH /api/domains/{id}`
///
/// All fields are optional. `url_id: null` and `subdomain_id: null` clear
/// the link.
///
/// # Errors
///
/// Returns 400 if a present field is invalid.
/// Returns 403 if the caller did not create the domain and is not a superuser.
/// Returns 404 if the domain does not exist.
pub async fn update_domain_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UpdateDomainRequest>,
) -> Result<Json<DomainItem>, AppError> {
    let domain = state
        .domain_service
        .update_domain(id, payload.into(), &actor)
        .await?;

    Ok(Json(domain.into()))
}

/// Deletes a domain and its category/language links.
///
/// # Endpoint
///
/// `DELETE /api/domains/{id}`
pub async fn delete_domain_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<StatusCode, AppError> {
    state.domain_service.delete_domain(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
