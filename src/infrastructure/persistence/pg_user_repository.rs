//! PostgreSQL implementation of the credential store and user administration.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{NewUser, UserAccount, UserRecord};
use crate::domain::repositories::{CredentialStore, UserAccountRepository};
use crate::error::AppError;

/// The two lookup statements used during login.
///
/// Both take the username as their single `$1` parameter. The users query
/// must return `(username, password, enabled)`; the authorities query
/// `(username, authority)` with one row per grant (null authorities are
/// skipped).
#[derive(Debug, Clone)]
pub struct CredentialQueries {
    pub users_by_username: String,
    pub authorities_by_username: String,
}

impl Default for CredentialQueries {
    fn default() -> Self {
        Self {
            users_by_username: r#"select username, password, enabled from "user" where username = $1"#
                .to_string(),
            authorities_by_username: r#"select username, authority from "user" where username = $1"#
                .to_string(),
        }
    }
}

/// PostgreSQL repository over the `user` table.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
    queries: CredentialQueries,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool and the default queries.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_queries(pool, CredentialQueries::default())
    }

    /// Creates a repository that runs custom lookup statements.
    pub fn with_queries(pool: Arc<PgPool>, queries: CredentialQueries) -> Self {
        Self { pool, queries }
    }
}

#[async_trait]
impl CredentialStore for PgUserRepository {
    async fn fetch_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRecord>(&self.queries.users_by_username)
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn fetch_authorities(&self, username: &str) -> Result<BTreeSet<String>, AppError> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            &self.queries.authorities_by_username,
        )
        .bind(username)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, authority)| authority)
            .filter(|authority| !authority.is_empty())
            .collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}

#[async_trait]
impl UserAccountRepository for PgUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserAccount, AppError> {
        let row = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO "user" (username, password, enabled, authority)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, enabled, authority, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.enabled)
        .bind(&user.authority)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, AppError> {
        let rows = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, username, enabled, authority, created_at
            FROM "user"
            ORDER BY username
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn set_enabled(&self, username: &str, enabled: bool) -> Result<(), AppError> {
        let result = sqlx::query(r#"UPDATE "user" SET enabled = $2 WHERE username = $1"#)
            .bind(username)
            .bind(enabled)
            .execute(self.pool.as_ref())
            .await?;

        ensure_updated(result.rows_affected(), username)
    }

    async fn set_authority(
        &self,
        username: &str,
        authority: Option<&str>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(r#"UPDATE "user" SET authority = $2 WHERE username = $1"#)
            .bind(username)
            .bind(authority)
            .execute(self.pool.as_ref())
            .await?;

        ensure_updated(result.rows_affected(), username)
    }

    async fn set_password(&self, username: &str, encoded_password: &str) -> Result<(), AppError> {
        let result = sqlx::query(r#"UPDATE "user" SET password = $2 WHERE username = $1"#)
            .bind(username)
            .bind(encoded_password)
            .execute(self.pool.as_ref())
            .await?;

        ensure_updated(result.rows_affected(), username)
    }
}

fn ensure_updated(rows_affected: u64, username: &str) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::not_found(
            "User not found",
            json!({ "username": username }),
        ));
    }
    Ok(())
}
