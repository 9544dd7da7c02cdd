//! Process-local session store.

use super::service::{SessionResult, SessionStore, generate_session_id};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Principal;

struct Entry {
    principal: Principal,
    expires_at: Instant,
}

/// In-memory session store with a fixed TTL.
///
/// Sessions are lost on restart and are not shared between instances; use
/// [`super::RedisSessionStore`] for multi-instance deployments. Expired
/// entries are dropped lazily on lookup and swept on every insert.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        debug!("Using in-memory session store (TTL: {}s)", ttl.as_secs());
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, principal: &Principal) -> SessionResult<String> {
        let session_id = generate_session_id();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            session_id.clone(),
            Entry {
                principal: principal.clone(),
                expires_at: now + self.ttl,
            },
        );

        Ok(session_id)
    }

    async fn load(&self, session_id: &str) -> SessionResult<Option<Principal>> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => {
                    return Ok(Some(entry.principal.clone()));
                }
                Some(_) => {}
            }
        }

        self.sessions.write().await.remove(session_id);
        debug!("Session expired");
        Ok(None)
    }

    async fn destroy(&self, session_id: &str) -> SessionResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
