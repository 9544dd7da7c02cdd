//! Access-denied response.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::Principal;
use crate::state::WebSettings;

#[derive(Template, WebTemplate)]
#[template(path = "access_denied.html")]
struct AccessDeniedTemplate {
    username: String,
}

/// Builds the response for an authenticated principal lacking the required role.
///
/// Redirects to `access_denied_page` when configured, otherwise renders
/// `templates/access_denied.html` with status 403.
pub fn access_denied_response(settings: &WebSettings, principal: Option<&Principal>) -> Response {
    if let Some(ref page) = settings.access_denied_page {
        return Redirect::to(page).into_response();
    }

    (
        StatusCode::FORBIDDEN,
        AccessDeniedTemplate {
            username: principal.map(|p| p.username.clone()).unwrap_or_default(),
        },
    )
        .into_response()
}
