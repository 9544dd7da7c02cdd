//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, session store setup, policy construction
//! and the Axum server lifecycle.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::domain::repositories::CredentialStore;
use crate::infrastructure::persistence::PgUserRepository;
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::routes::app_router;
use crate::security::{AuthenticationSuccessHandler, AuthorityTargetSuccessHandler, standard_policy};
use crate::state::{AppState, WebSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Session store (Redis, or in-memory fallback)
/// - Access policy and authentication service
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - An access rule pattern is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let sessions = build_session_store(&config).await;

    let store: Arc<dyn CredentialStore> = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let auth_service = Arc::new(AuthService::new(
        store,
        config.password_encoder.build(),
        config.store_timeout(),
    ));

    let policy = standard_policy().context("Invalid access rule")?;
    for (index, rule) in policy.rules().iter().enumerate() {
        let patterns: Vec<&str> = rule.patterns().collect();
        tracing::debug!(index, ?patterns, requirement = ?rule.requirement(), "Access rule");
    }
    let success_handler: Arc<dyn AuthenticationSuccessHandler> =
        Arc::new(AuthorityTargetSuccessHandler::default());

    let state = AppState::new(
        auth_service,
        sessions,
        policy,
        success_handler,
        WebSettings::from_config(&config),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_session_store(config: &Config) -> Arc<dyn SessionStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url, config.session_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Sessions stored in Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory sessions.", e);
            }
        }
    } else {
        tracing::info!("Sessions stored in memory");
    }

    Arc::new(MemorySessionStore::new(config.session_ttl()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
