#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use biomedical_portal::AppError;
use biomedical_portal::api;
use biomedical_portal::application::services::AuthService;
use biomedical_portal::domain::entities::UserRecord;
use biomedical_portal::domain::repositories::CredentialStore;
use biomedical_portal::infrastructure::session::MemorySessionStore;
use biomedical_portal::security::{
    AuthorityTargetSuccessHandler, NoOpPasswordEncoder, PasswordEncoder, standard_policy,
};
use biomedical_portal::state::{AppState, WebSettings};
use biomedical_portal::web;
use biomedical_portal::web::middleware::security;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_VERSION: &str = "9.9.9-test";

/// Credential store backed by a map, standing in for the `user` table.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, (UserRecord, BTreeSet<String>)>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        username: &str,
        password: &str,
        enabled: bool,
        authorities: &[&str],
    ) -> Self {
        self.users.insert(
            username.to_string(),
            (
                UserRecord::new(username, password, enabled),
                authorities.iter().map(|a| a.to_string()).collect(),
            ),
        );
        self
    }

    /// alice/secret with ROLE_USER, root/rootpw with ROLE_ADMIN, carol disabled.
    pub fn seeded() -> Self {
        Self::new()
            .with_user("alice", "secret", true, &["ROLE_USER"])
            .with_user("root", "rootpw", true, &["ROLE_ADMIN"])
            .with_user("carol", "secret", false, &["ROLE_USER"])
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn fetch_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(username).map(|(record, _)| record.clone()))
    }

    async fn fetch_authorities(&self, username: &str) -> Result<BTreeSet<String>, AppError> {
        Ok(self
            .users
            .get(username)
            .map(|(_, authorities)| authorities.clone())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Credential store whose every call fails as if the database were down.
pub struct UnavailableCredentialStore;

#[async_trait]
impl CredentialStore for UnavailableCredentialStore {
    async fn fetch_user(&self, _username: &str) -> Result<Option<UserRecord>, AppError> {
        Err(AppError::store_unavailable(
            "Database temporarily unavailable",
            json!({}),
        ))
    }

    async fn fetch_authorities(&self, _username: &str) -> Result<BTreeSet<String>, AppError> {
        Err(AppError::store_unavailable(
            "Database temporarily unavailable",
            json!({}),
        ))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn test_settings() -> WebSettings {
    WebSettings {
        app_version: TEST_VERSION.to_string(),
        ..WebSettings::default()
    }
}

pub fn create_test_state_with(
    store: Arc<dyn CredentialStore>,
    encoder: Arc<dyn PasswordEncoder>,
    settings: WebSettings,
) -> AppState {
    let auth_service = Arc::new(AuthService::new(store, encoder, Duration::from_secs(5)));

    AppState::new(
        auth_service,
        Arc::new(MemorySessionStore::new(Duration::from_secs(1800))),
        standard_policy().unwrap(),
        Arc::new(AuthorityTargetSuccessHandler::default()),
        settings,
    )
}

/// State over [`InMemoryCredentialStore::seeded`] with plain-text comparison.
pub fn create_test_state() -> AppState {
    create_test_state_with(
        Arc::new(InMemoryCredentialStore::seeded()),
        Arc::new(NoOpPasswordEncoder),
        test_settings(),
    )
}

async fn probe() -> &'static str {
    "ok"
}

/// The application routes plus probe endpoints under each policy prefix.
pub fn test_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::routes())
        .route("/register", get(probe))
        .route("/admin/reports", get(probe))
        .route("/user/profile", get(probe))
        .route("/patients", get(probe));

    security::protect(router, state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

/// Logs in through the form and returns the `Cookie` header value
/// (`SESSION=...`) for follow-up requests.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/authenticateTheUser")
        .form(&[("username", username), ("password", password)])
        .await;

    session_cookie_pair(&response)
}

/// Extracts `SESSION=<id>` from the response's `Set-Cookie` header.
pub fn session_cookie_pair(response: &axum_test::TestResponse) -> String {
    let set_cookie = response.header("set-cookie");
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}
