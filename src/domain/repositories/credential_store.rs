//! Read-only credential lookups used by the authentication decision.

use crate::domain::entities::UserRecord;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Repository interface for the two lookups a login needs.
///
/// Both lookups are parameterized by the username only and have no side
/// effects. Implementations must allow concurrent callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetches the stored `(username, password, enabled)` row.
    ///
    /// Returns `Ok(None)` when the username is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the store cannot be reached.
    async fn fetch_user(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Fetches the authority names granted to `username`.
    ///
    /// Returns an empty set when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] when the store cannot be reached.
    async fn fetch_authorities(&self, username: &str) -> Result<BTreeSet<String>, AppError>;

    /// Returns `true` if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}
