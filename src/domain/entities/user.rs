//! User entities as stored in the credential store.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The credential row fetched for a login attempt.
///
/// `password` holds whatever the configured encoder stores: an Argon2 PHC
/// string, or the verbatim password for legacy plain-text rows.
#[derive(Clone, FromRow)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub enabled: bool,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>, enabled: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            enabled,
        }
    }
}

// Keeps stored passwords out of logs.
impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"***")
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Full user row as seen by the admin tooling.
#[derive(Debug, Clone, FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub enabled: bool,
    pub authority: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user.
///
/// `password` must already be encoded with the service's password encoder.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub enabled: bool,
    pub authority: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"***")
            .field("enabled", &self.enabled)
            .field("authority", &self.authority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password() {
        let record = UserRecord::new("alice", "secret", true);
        let rendered = format!("{record:?}");

        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));
    }
}
