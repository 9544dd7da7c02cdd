//! Operational route configuration.

use crate::api::handlers::health_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes outside the login flow.
///
/// # Endpoints
///
/// - `GET /health` - Component health (permit-all in the access policy)
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
