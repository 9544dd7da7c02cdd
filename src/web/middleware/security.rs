//! Security filter applying the [`AccessPolicy`](crate::security::AccessPolicy)
//! to every request.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use crate::domain::entities::Principal;
use crate::security::{Decision, LOGIN_PAGE};
use crate::state::AppState;
use crate::web::handlers::access_denied_response;
use crate::web::session_cookie::read_session_id;

/// Resolves the session principal and enforces the access policy.
///
/// # Flow
///
/// 1. Paths on the ignore list pass straight through: no session lookup,
///    no principal in the request extensions
/// 2. The `SESSION` cookie is resolved through the session store
/// 3. The policy decides:
///    - `Permit`: the [`Principal`] (if any) is inserted into request
///      extensions and the request continues
///    - `Unauthenticated`: redirect to the login page
///    - `Denied`: access-denied redirect or 403 page
///
/// An unreadable session store is treated as "no session", so the user is
/// sent to log in again rather than shown an error.
///
/// # Example
///
/// ```rust,ignore
/// let app = web::middleware::security::protect(
///     Router::new().route("/admin/home", get(home_handler)),
///     state,
/// );
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    if st.policy.is_ignored(&path) {
        return next.run(req).await;
    }

    let session_id = read_session_id(req.headers());
    let principal = match session_id {
        Some(session_id) => resolve_principal(&st, &session_id).await,
        None => None,
    };

    match st.policy.decide(&path, principal.as_ref()) {
        Decision::Permit => {
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            next.run(req).await
        }
        Decision::Unauthenticated => {
            debug!(path = %path, "Anonymous request to protected path");
            Redirect::to(LOGIN_PAGE).into_response()
        }
        Decision::Denied => {
            let username = principal.as_ref().map_or("", |p| p.username.as_str());
            debug!(path = %path, username, "Access denied");
            access_denied_response(&st.web, principal.as_ref())
        }
    }
}

async fn resolve_principal(st: &AppState, session_id: &str) -> Option<Principal> {
    match st.sessions.load(session_id).await {
        Ok(principal) => principal,
        Err(e) => {
            warn!(error = %e, "Session lookup failed, treating request as anonymous");
            None
        }
    }
}

/// Wraps every route of `router` (and its fallback) in the security filter.
pub fn protect(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(state.clone(), layer))
        .with_state(state)
}
