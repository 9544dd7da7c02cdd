//! Logout handler.

use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect},
};
use tracing::warn;

use crate::security::LOGOUT_SUCCESS_URL;
use crate::state::AppState;
use crate::web::session_cookie::{clear_session_cookie, read_session_id};

/// Ends the current session.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always clears the cookie and redirects to `/showMyLoginPage?logout`,
/// whether or not a session existed.
pub async fn logout_handler(State(st): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(session_id) = read_session_id(&headers)
        && let Err(e) = st.sessions.destroy(&session_id).await
    {
        warn!(error = %e, "Failed to destroy session on logout");
    }

    (
        [(SET_COOKIE, clear_session_cookie(&st.web))],
        Redirect::to(LOGOUT_SUCCESS_URL),
    )
}
