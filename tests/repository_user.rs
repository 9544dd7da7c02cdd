use biomedical_portal::AppError;
use biomedical_portal::domain::entities::NewUser;
use biomedical_portal::domain::repositories::{CredentialStore, UserAccountRepository};
use biomedical_portal::infrastructure::persistence::{CredentialQueries, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(username: &str, authority: Option<&str>, enabled: bool) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "secret".to_string(),
        enabled,
        authority: authority.map(str::to_string),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_fetch_user_and_authorities(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create_user(new_user("alice", Some("ROLE_USER"), true))
        .await
        .unwrap();

    let user = repo.fetch_user("alice").await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.password, "secret");
    assert!(user.enabled);

    let authorities = repo.fetch_authorities("alice").await.unwrap();
    assert_eq!(authorities.len(), 1);
    assert!(authorities.contains("ROLE_USER"));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_fetch_unknown_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.fetch_user("bob").await.unwrap().is_none());
    assert!(repo.fetch_authorities("bob").await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_null_authority_yields_empty_set(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create_user(new_user("dave", None, true)).await.unwrap();

    assert!(repo.fetch_authorities("dave").await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_duplicate_username_conflicts(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create_user(new_user("alice", None, true)).await.unwrap();

    let result = repo.create_user(new_user("alice", None, true)).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_admin_updates(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create_user(new_user("alice", Some("ROLE_USER"), true))
        .await
        .unwrap();

    repo.set_enabled("alice", false).await.unwrap();
    repo.set_authority("alice", Some("ROLE_ADMIN")).await.unwrap();
    repo.set_password("alice", "changed").await.unwrap();

    let user = repo.fetch_user("alice").await.unwrap().unwrap();
    assert!(!user.enabled);
    assert_eq!(user.password, "changed");
    assert!(repo.fetch_authorities("alice").await.unwrap().contains("ROLE_ADMIN"));

    let listed = repo.list_users().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].authority.as_deref(), Some("ROLE_ADMIN"));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_missing_user_is_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.set_enabled("ghost", true).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_custom_queries(pool: PgPool) {
    sqlx::query(
        r#"INSERT INTO "user" (username, password, enabled, authority)
           VALUES ('erin', 'secret', TRUE, 'ROLE_USER')"#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = PgUserRepository::with_queries(
        Arc::new(pool),
        CredentialQueries {
            users_by_username: r#"select username, password, enabled from "user" where lower(username) = lower($1)"#
                .to_string(),
            ..CredentialQueries::default()
        },
    );

    let user = repo.fetch_user("ERIN").await.unwrap();
    assert_eq!(user.map(|u| u.username).as_deref(), Some("erin"));
}
