//! Landing page shown after login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::IntoResponse};

use crate::domain::entities::Principal;
use crate::security::LOGOUT_URL;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    username: String,
    authorities: Vec<String>,
    version: String,
    logout_action: &'static str,
}

/// Renders the principal's home page.
///
/// # Endpoints
///
/// `GET /`, `GET /admin/home`, `GET /user/home`
///
/// Only reachable through the security filter, which places the
/// [`Principal`] in the request extensions.
pub async fn home_handler(
    State(st): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> impl IntoResponse {
    HomeTemplate {
        username: principal.username,
        authorities: principal.authorities.into_iter().collect(),
        version: st.web.app_version.clone(),
        logout_action: LOGOUT_URL,
    }
}
