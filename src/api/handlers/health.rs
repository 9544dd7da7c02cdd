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
/// - **200 OK**: Both stores reachable
/// - **503 Service Unavailable**: One or more stores unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "1.0.3",
///   "checks": {
///     "credential_store": { "status": "ok", "message": "Connected" },
///     "session_store": { "status": "ok", "message": "Reachable" }
///   }
/// }
/// ```
///
/// `version` is the configured application version, the same value the
/// login page shows.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let credential_store = check_credential_store(&state).await;
    let session_store = check_session_store(&state).await;

    let all_healthy = credential_store.is_ok() && session_store.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: state.web.app_version.clone(),
        checks: HealthChecks {
            credential_store,
            session_store,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Probes the credential store within the configured store timeout.
async fn check_credential_store(state: &AppState) -> CheckStatus {
    if state.auth_service.store_healthy().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Credential store unreachable")
    }
}

async fn check_session_store(state: &AppState) -> CheckStatus {
    if state.sessions.health_check().await {
        CheckStatus::ok("Reachable")
    } else {
        CheckStatus::error("Session store unreachable")
    }
}
