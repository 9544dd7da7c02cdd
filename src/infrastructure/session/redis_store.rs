//! Redis-backed session store.

use super::service::{SessionError, SessionResult, SessionStore, generate_session_id};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use crate::domain::entities::Principal;

/// Redis session store. Principals are stored as JSON with `SET EX`.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Unlike a cache, read failures are surfaced so the caller can decide how
/// to treat an unreadable session.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> SessionResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionError::ConnectionError(format!("Failed to create Redis client: {e}"))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionError::ConnectionError(format!("Failed to connect to Redis: {e}"))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionError::ConnectionError(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis session store");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, session_id: &str) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, principal: &Principal) -> SessionResult<String> {
        let session_id = generate_session_id();
        let payload = serde_json::to_string(principal)?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(self.build_key(&session_id), payload, self.ttl_seconds)
            .await
            .map_err(|e| SessionError::OperationError(format!("SET failed: {e}")))?;

        debug!(username = %principal.username, "Session created");
        Ok(session_id)
    }

    async fn load(&self, session_id: &str) -> SessionResult<Option<Principal>> {
        let mut conn = self.client.clone();

        let payload = conn
            .get::<_, Option<String>>(self.build_key(session_id))
            .await
            .map_err(|e| SessionError::OperationError(format!("GET failed: {e}")))?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn destroy(&self, session_id: &str) -> SessionResult<()> {
        let mut conn = self.client.clone();

        if let Err(e) = conn.del::<_, i32>(self.build_key(session_id)).await {
            warn!("Redis DEL error for session: {}", e);
            return Err(SessionError::OperationError(format!("DEL failed: {e}")));
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
