//! Login flow route configuration.

use crate::security::{LOGIN_PAGE, LOGIN_PROCESSING_URL, LOGOUT_URL};
use crate::state::AppState;
use crate::web::handlers::{authenticate_handler, home_handler, login_handler, logout_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Login, logout and landing routes.
///
/// Access control is not applied here; the whole router is wrapped by
/// [`crate::web::middleware::security::protect`].
///
/// # Endpoints
///
/// - `GET /showMyLoginPage` - Login page
/// - `POST /authenticateTheUser` - Login form processing
/// - `POST /logout` - End the session
/// - `GET /`, `GET /admin/home`, `GET /user/home` - Landing pages
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PAGE, get(login_handler))
        .route(LOGIN_PROCESSING_URL, post(authenticate_handler))
        .route(LOGOUT_URL, post(logout_handler))
        .route("/", get(home_handler))
        .route("/admin/home", get(home_handler))
        .route("/user/home", get(home_handler))
}
