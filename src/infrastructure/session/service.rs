//! Session store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Principal;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store connection error: {0}")]
    ConnectionError(String),
    #[error("session store operation error: {0}")]
    OperationError(String),
    #[error("session payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Maps opaque session ids to authenticated principals.
///
/// Sessions expire after the store's TTL. Implementations must be thread-safe.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::MemorySessionStore`]
/// - [`crate::infrastructure::session::RedisSessionStore`]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `principal` under a fresh session id and returns the id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the principal cannot be stored.
    async fn create(&self, principal: &Principal) -> SessionResult<String>;

    /// Looks up the principal for a session id.
    ///
    /// Returns `Ok(None)` for unknown or expired sessions.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be read.
    async fn load(&self, session_id: &str) -> SessionResult<Option<Principal>>;

    /// Removes a session. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be written.
    async fn destroy(&self, session_id: &str) -> SessionResult<()>;

    /// Returns `true` if the store is operational.
    async fn health_check(&self) -> bool;
}

/// Generates a 256-bit random session id, hex encoded.
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
