//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /showMyLoginPage`     - Login page (public)
//! - `POST /authenticateTheUser` - Login form processing (public)
//! - `POST /logout`              - End the session (public)
//! - `GET  /health`              - Credential and session store health (public)
//! - `GET  /`, `/admin/home`, `/user/home` - Landing pages (policy-protected)
//! - `/static/*`                 - Static assets (ignored by the security filter)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Security filter** - Session resolution and ordered access rules
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::security;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with every route, the security filter and tracing.
///
/// Paths that match no route still go through the security filter, so an
/// anonymous request for an unknown path is redirected to the login page
/// rather than answered with 404.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::routes())
        .nest_service("/static", ServeDir::new("static"));

    security::protect(router, state).layer(tracing::layer())
}

/// Constructs the application service with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
