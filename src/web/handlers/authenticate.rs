//! Login form processing.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use validator::Validate;

use crate::application::services::AuthOutcome;
use crate::error::AppError;
use crate::security::LOGIN_FAILURE_URL;
use crate::state::AppState;
use crate::web::session_cookie::{read_session_id, session_cookie};

/// Submitted login form.
///
/// Missing fields deserialize as empty strings and then fail validation, so
/// a malformed form is handled like wrong credentials. No upper length bound
/// is applied here; an overlong username simply matches no stored user.
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Authenticates the submitted credentials.
///
/// # Endpoint
///
/// `POST /authenticateTheUser` (form fields `username`, `password`)
///
/// # Responses
///
/// - **303** to the success handler's target with a fresh `SESSION` cookie
/// - **303** to `/showMyLoginPage?error` for any rejection, including a body
///   that is not `application/x-www-form-urlencoded`; the reason is never
///   revealed
/// - **503** when the credential store is unavailable
///
/// A session presented with the request is destroyed before the new one is
/// issued.
pub async fn authenticate_handler(
    State(st): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = match form {
        Ok(Form(form)) if form.validate().is_ok() => form,
        Ok(_) => return Ok(Redirect::to(LOGIN_FAILURE_URL).into_response()),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable login form");
            return Ok(Redirect::to(LOGIN_FAILURE_URL).into_response());
        }
    };

    let principal = match st
        .auth_service
        .authenticate(&form.username, &form.password)
        .await?
    {
        AuthOutcome::Accepted(principal) => principal,
        AuthOutcome::Rejected(_) => return Ok(Redirect::to(LOGIN_FAILURE_URL).into_response()),
    };

    if let Some(previous) = read_session_id(&headers)
        && let Err(e) = st.sessions.destroy(&previous).await
    {
        warn!(error = %e, "Failed to destroy previous session");
    }

    let session_id = st.sessions.create(&principal).await.map_err(|e| {
        AppError::internal("Failed to create session", json!({ "cause": e.to_string() }))
    })?;

    let target = st.success_handler.target_url(&principal);

    Ok((
        [(SET_COOKIE, session_cookie(&session_id, &st.web))],
        Redirect::to(&target),
    )
        .into_response())
}
