//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The database is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 12 URLs stored" },
///     "probe": { "status": "ok", "message": "http" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    // The probe has no state to check; report which one is wired in.
    let probe_check = CheckStatus::ok(state.reachability.probe_name());

    let all_healthy = db_check.is_ok() && probe_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            probe: probe_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting stored URLs.
async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
        .fetch_one(state.db.as_ref())
        .await
    {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} URLs stored")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}
