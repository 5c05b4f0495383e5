//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Resolves `Authorization: Bearer <token>` to a [`Session`].
///
/// The session and its [`Actor`] are inserted into request extensions, so
/// handlers take `Extension<Actor>` (or `Extension<Session>` when they need
/// the token itself, as logout does).
///
/// A missing header, a malformed value, or an unknown or revoked token all
/// end the request with `401` and `WWW-Authenticate: Bearer`.
///
/// [`Session`]: crate::application::services::Session
/// [`Actor`]: crate::domain::entities::Actor
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(&mut parts, &()).await else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Missing or malformed bearer token"}),
        ));
    };

    let session = st.auth_service.authenticate(&token).await?;

    parts.extensions.insert(session.actor.clone());
    parts.extensions.insert(session);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
