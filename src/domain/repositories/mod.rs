//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CredentialStore`] - Read-only user and authority lookups for login
//! - [`UserAccountRepository`] - User administration used by the `admin` CLI
//!
//! # Testing
//!
//! See integration tests in `tests/repository_user.rs` for usage examples.

pub mod credential_store;
pub mod user_account_repository;

pub use credential_store::CredentialStore;
pub use user_account_repository::UserAccountRepository;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
