//! Authentication decision for username/password logins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::entities::Principal;
use crate::domain::repositories::CredentialStore;
use crate::error::AppError;
use crate::security::PasswordEncoder;

/// Compared against when the user is missing or disabled, so those paths
/// spend the same encoder work as a real password check.
const DECOY_PASSWORD: &str = "decoy-password-for-uniform-timing";

/// Why a login was rejected.
///
/// Internal only: callers must present every variant identically to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownUserOrDisabled,
    BadCredentials,
}

impl RejectReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnknownUserOrDisabled => "unknown_user_or_disabled",
            Self::BadCredentials => "bad_credentials",
        }
    }
}

/// Result of a completed authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted(Principal),
    Rejected(RejectReason),
}

impl AuthOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Service that verifies presented credentials against the credential store.
///
/// Every call is independent: there is no lockout, throttling or retry.
/// Each store lookup is bounded by `store_timeout`; expiry is reported as
/// [`AppError::StoreUnavailable`], never as a rejection.
pub struct AuthService<S: CredentialStore + ?Sized = dyn CredentialStore> {
    store: Arc<S>,
    encoder: Arc<dyn PasswordEncoder>,
    store_timeout: Duration,
    decoy_hash: Option<String>,
}

impl<S: CredentialStore + ?Sized> AuthService<S> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `store` - credential lookups
    /// - `encoder` - comparison strategy; must match how stored passwords were written
    /// - `store_timeout` - upper bound for each store call
    pub fn new(
        store: Arc<S>,
        encoder: Arc<dyn PasswordEncoder>,
        store_timeout: Duration,
    ) -> Self {
        let decoy_hash = encoder.encode(DECOY_PASSWORD).ok();
        Self {
            store,
            encoder,
            store_timeout,
            decoy_hash,
        }
    }

    /// Authenticates `username` with `presented_password`.
    ///
    /// 1. Fetch the user; unknown or disabled users are rejected.
    /// 2. Compare the presented password with the stored value.
    /// 3. On match, fetch authorities and build the [`Principal`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store fails or times out.
    /// A rejection is `Ok(AuthOutcome::Rejected(_))`, not an error.
    pub async fn authenticate(
        &self,
        username: &str,
        presented_password: &str,
    ) -> Result<AuthOutcome, AppError> {
        let user = match self.bounded(self.store.fetch_user(username)).await {
            Ok(user) => user,
            Err(e) => return Err(self.store_failure(username, e)),
        };

        let user = match user {
            Some(user) if user.enabled => user,
            _ => {
                self.spend_decoy_comparison(presented_password).await;
                return Ok(self.reject(username, RejectReason::UnknownUserOrDisabled));
            }
        };

        if !self.verify(presented_password, &user.password).await {
            return Ok(self.reject(username, RejectReason::BadCredentials));
        }

        let authorities = match self.bounded(self.store.fetch_authorities(username)).await {
            Ok(authorities) => authorities,
            Err(e) => return Err(self.store_failure(username, e)),
        };

        info!(
            username = %user.username,
            authorities = ?authorities,
            "Authentication accepted"
        );
        metrics::counter!("auth_attempts_total", "outcome" => "accepted").increment(1);

        Ok(AuthOutcome::Accepted(Principal::new(
            user.username,
            authorities,
        )))
    }

    /// Returns `true` if the credential store is reachable.
    pub async fn store_healthy(&self) -> bool {
        tokio::time::timeout(self.store_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::store_unavailable(
                "Credential store timed out",
                json!({ "timeout_ms": self.store_timeout.as_millis() }),
            )),
        }
    }

    /// Runs the encoder comparison on the blocking thread pool.
    async fn verify(&self, presented_password: &str, stored_password: &str) -> bool {
        let encoder = Arc::clone(&self.encoder);
        let presented = presented_password.to_owned();
        let stored = stored_password.to_owned();

        match tokio::task::spawn_blocking(move || encoder.matches(&presented, &stored)).await {
            Ok(matched) => matched,
            Err(e) => {
                error!(error = %e, "Password comparison task failed");
                false
            }
        }
    }

    async fn spend_decoy_comparison(&self, presented_password: &str) {
        if let Some(decoy) = &self.decoy_hash {
            let _ = self.verify(presented_password, decoy).await;
        }
    }

    fn reject(&self, username: &str, reason: RejectReason) -> AuthOutcome {
        debug!(username, reason = reason.as_str(), "Authentication rejected");
        metrics::counter!("auth_attempts_total", "outcome" => "rejected").increment(1);
        AuthOutcome::Rejected(reason)
    }

    fn store_failure(&self, username: &str, e: AppError) -> AppError {
        error!(username, error = %e, "Authentication could not reach credential store");
        metrics::counter!("auth_attempts_total", "outcome" => "store_unavailable").increment(1);
        match e {
            AppError::StoreUnavailable { .. } => e,
            other => AppError::store_unavailable(
                "Credential store failed",
                json!({ "cause": other.to_string() }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserRecord;
    use crate::domain::repositories::MockCredentialStore;
    use crate::security::{Argon2PasswordEncoder, NoOpPasswordEncoder};
    use async_trait::async_trait;
    use std::collections::BTreeSet;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn authorities(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn service(store: MockCredentialStore) -> AuthService<MockCredentialStore> {
        AuthService::new(Arc::new(store), Arc::new(NoOpPasswordEncoder), TIMEOUT)
    }

    fn alice_store() -> MockCredentialStore {
        let mut store = MockCredentialStore::new();
        store
            .expect_fetch_user()
            .withf(|username| username == "alice")
            .returning(|_| Ok(Some(UserRecord::new("alice", "secret", true))));
        store
    }

    #[tokio::test]
    async fn test_authenticate_success_returns_stored_authorities() {
        let mut store = alice_store();
        store
            .expect_fetch_authorities()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(authorities(&["ROLE_USER"])));

        let outcome = service(store).authenticate("alice", "secret").await.unwrap();

        match outcome {
            AuthOutcome::Accepted(principal) => {
                assert_eq!(principal.username, "alice");
                assert_eq!(principal.authorities, authorities(&["ROLE_USER"]));
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut store = alice_store();
        store.expect_fetch_authorities().times(0);

        let outcome = service(store).authenticate("alice", "wrong").await.unwrap();

        assert_eq!(outcome, AuthOutcome::Rejected(RejectReason::BadCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut store = MockCredentialStore::new();
        store.expect_fetch_user().times(1).returning(|_| Ok(None));
        store.expect_fetch_authorities().times(0);

        let outcome = service(store).authenticate("bob", "anything").await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Rejected(RejectReason::UnknownUserOrDisabled)
        );
    }

    #[tokio::test]
    async fn test_authenticate_disabled_user_with_correct_password() {
        let mut store = MockCredentialStore::new();
        store
            .expect_fetch_user()
            .returning(|_| Ok(Some(UserRecord::new("carol", "secret", false))));
        store.expect_fetch_authorities().times(0);

        let outcome = service(store).authenticate("carol", "secret").await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Rejected(RejectReason::UnknownUserOrDisabled)
        );
    }

    #[tokio::test]
    async fn test_user_without_authorities_is_accepted_with_empty_set() {
        let mut store = alice_store();
        store
            .expect_fetch_authorities()
            .returning(|_| Ok(BTreeSet::new()));

        let outcome = service(store).authenticate("alice", "secret").await.unwrap();

        match outcome {
            AuthOutcome::Accepted(principal) => assert!(principal.authorities.is_empty()),
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_rejection() {
        let mut store = MockCredentialStore::new();
        store.expect_fetch_user().returning(|_| {
            Err(AppError::store_unavailable("connection refused", json!({})))
        });

        let result = service(store).authenticate("alice", "secret").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_authority_lookup_failure_is_store_unavailable() {
        let mut store = alice_store();
        store
            .expect_fetch_authorities()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(store).authenticate("alice", "secret").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_argon2_encoded_password() {
        let encoder = Argon2PasswordEncoder::new();
        let stored = encoder.encode("secret").unwrap();

        let mut store = MockCredentialStore::new();
        store
            .expect_fetch_user()
            .returning(move |_| Ok(Some(UserRecord::new("alice", stored.clone(), true))));
        store
            .expect_fetch_authorities()
            .returning(|_| Ok(authorities(&["ROLE_ADMIN"])));

        let svc = AuthService::new(Arc::new(store), Arc::new(encoder), TIMEOUT);

        assert!(svc.authenticate("alice", "secret").await.unwrap().is_accepted());
        assert_eq!(
            svc.authenticate("alice", "wrong").await.unwrap(),
            AuthOutcome::Rejected(RejectReason::BadCredentials)
        );
    }

    struct SlowStore;

    #[async_trait]
    impl CredentialStore for SlowStore {
        async fn fetch_user(&self, _username: &str) -> Result<Option<UserRecord>, AppError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(None)
        }

        async fn fetch_authorities(&self, _username: &str) -> Result<BTreeSet<String>, AppError> {
            Ok(BTreeSet::new())
        }

        async fn health_check(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(2)).await;
            true
        }
    }

    #[tokio::test]
    async fn test_store_timeout_is_store_unavailable() {
        let svc = AuthService::new(
            Arc::new(SlowStore),
            Arc::new(NoOpPasswordEncoder),
            Duration::from_millis(20),
        );

        let result = svc.authenticate("alice", "secret").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
        assert!(!svc.store_healthy().await);
    }

    #[tokio::test]
    async fn test_trait_object_store() {
        let store: Arc<dyn CredentialStore> = Arc::new(alice_store_with_authorities());
        let svc: AuthService = AuthService::new(store, Arc::new(NoOpPasswordEncoder), TIMEOUT);

        assert!(svc.authenticate("alice", "secret").await.unwrap().is_accepted());
    }

    /// Plain-text comparison that burns wall-clock time like a slow hash.
    struct SluggishEncoder;

    impl PasswordEncoder for SluggishEncoder {
        fn encode(&self, raw: &str) -> Result<String, crate::security::PasswordError> {
            Ok(raw.to_string())
        }

        fn matches(&self, raw: &str, stored: &str) -> bool {
            std::thread::sleep(Duration::from_millis(300));
            raw == stored
        }
    }

    #[tokio::test]
    async fn test_password_comparison_does_not_block_runtime() {
        let svc = AuthService::new(
            Arc::new(alice_store_with_authorities()),
            Arc::new(SluggishEncoder),
            TIMEOUT,
        );

        let started = std::time::Instant::now();
        let ticker = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            started.elapsed()
        };

        let (outcome, ticked_after) = tokio::join!(svc.authenticate("alice", "secret"), ticker);

        assert!(outcome.unwrap().is_accepted());
        assert!(
            ticked_after < Duration::from_millis(200),
            "runtime stalled for {ticked_after:?}"
        );
    }

    fn alice_store_with_authorities() -> MockCredentialStore {
        let mut store = alice_store();
        store
            .expect_fetch_authorities()
            .returning(|_| Ok(authorities(&["ROLE_USER"])));
        store
    }
}
