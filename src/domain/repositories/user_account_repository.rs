//! Repository trait for user administration.

use crate::domain::entities::{NewUser, UserAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Write-side operations on the user table.
///
/// The web service never writes users; this is used by the `admin` binary.
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, AppError>;

    /// Lists all users ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_users(&self) -> Result<Vec<UserAccount>, AppError>;

    /// Enables or disables a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn set_enabled(&self, username: &str, enabled: bool) -> Result<(), AppError>;

    /// Replaces the authority granted to a user. `None` revokes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn set_authority(&self, username: &str, authority: Option<&str>)
    -> Result<(), AppError>;

    /// Replaces the stored (already encoded) password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn set_password(&self, username: &str, encoded_password: &str) -> Result<(), AppError>;
}
