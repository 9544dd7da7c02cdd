//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::AuthService;
use crate::config::Config;
use crate::infrastructure::session::SessionStore;
use crate::security::{AccessPolicy, AuthenticationSuccessHandler};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "SESSION";

/// Presentation settings taken from configuration.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Exposed to the login view as `version`.
    pub app_version: String,
    /// Redirect target on access denied; `None` renders the 403 view.
    pub access_denied_page: Option<String>,
    /// Adds `Secure` to the session cookie.
    pub secure_cookie: bool,
    /// Cookie `Max-Age`, kept equal to the session TTL.
    pub session_ttl_seconds: u64,
}

impl WebSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            app_version: config.app_version.clone(),
            access_denied_page: config.access_denied_page.clone(),
            secure_cookie: config.session_cookie_secure,
            session_ttl_seconds: config.session_ttl_seconds,
        }
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            access_denied_page: None,
            secure_cookie: false,
            session_ttl_seconds: 1800,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub sessions: Arc<dyn SessionStore>,
    pub policy: Arc<AccessPolicy>,
    pub success_handler: Arc<dyn AuthenticationSuccessHandler>,
    pub web: Arc<WebSettings>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        sessions: Arc<dyn SessionStore>,
        policy: AccessPolicy,
        success_handler: Arc<dyn AuthenticationSuccessHandler>,
        web: WebSettings,
    ) -> Self {
        Self {
            auth_service,
            sessions,
            policy: Arc::new(policy),
            success_handler,
            web: Arc::new(web),
        }
    }
}
