//! Handlers for registration, login and session endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserItem};
use crate::application::services::Session;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a staff account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 if the email is outside the allowed domain, the passwords
/// differ, or the password is too weak.
/// Returns 409 if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserItem>), AppError> {
    payload.validate()?;

    let user = state.auth_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// The token is returned once; only its HMAC is stored.
///
/// # Errors
///
/// Returns 401 if the email or password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(result.into()))
}

/// Revokes the token used for this request.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /api/auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<UserItem>, AppError> {
    let user = state.auth_service.get_user(actor.user_id).await?;
    Ok(Json(user.into()))
}
