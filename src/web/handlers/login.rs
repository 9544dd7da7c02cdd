//! Login page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::security::LOGIN_PROCESSING_URL;
use crate::state::AppState;

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - `version` - configured application version
/// - `error` - a previous attempt failed
/// - `logout` - the user just logged out
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    version: String,
    action: &'static str,
    error: bool,
    logout: bool,
}

/// Query flags set by the failure and logout redirects.
///
/// Only presence matters: `?error` and `?error=1` are equivalent.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageParams {
    pub error: Option<String>,
    pub logout: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /showMyLoginPage`
///
/// The form posts `username` and `password` to `/authenticateTheUser`.
pub async fn login_handler(
    State(st): State<AppState>,
    Query(params): Query<LoginPageParams>,
) -> impl IntoResponse {
    LoginTemplate {
        version: st.web.app_version.clone(),
        action: LOGIN_PROCESSING_URL,
        error: params.error.is_some(),
        logout: params.logout.is_some(),
    }
}
