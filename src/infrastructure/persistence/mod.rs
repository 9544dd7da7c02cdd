//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with SQLx so the lookup statements can be
//! swapped through [`CredentialQueries`].
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Credential lookups and user administration

pub mod pg_user_repository;

pub use pg_user_repository::{CredentialQueries, PgUserRepository};
