//! Authenticated principal attached to a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prefix that turns a role name into its authority name (`ADMIN` -> `ROLE_ADMIN`).
pub const ROLE_PREFIX: &str = "ROLE_";

/// The identity associated with a session after a successful login.
///
/// Authorities are captured at authentication time and are not re-read on
/// later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub authorities: BTreeSet<String>,
    pub authenticated_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(username: impl Into<String>, authorities: BTreeSet<String>) -> Self {
        Self {
            username: username.into(),
            authorities,
            authenticated_at: Utc::now(),
        }
    }

    /// Returns `true` if the principal holds exactly this authority.
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// Returns `true` if the principal holds `ROLE_<role>`.
    ///
    /// A role already carrying the prefix is accepted as-is.
    pub fn has_role(&self, role: &str) -> bool {
        if role.starts_with(ROLE_PREFIX) {
            self.has_authority(role)
        } else {
            self.has_authority(&format!("{ROLE_PREFIX}{role}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(authorities: &[&str]) -> Principal {
        Principal::new(
            "alice",
            authorities.iter().map(|a| a.to_string()).collect(),
        )
    }

    #[test]
    fn test_has_role_adds_prefix() {
        let p = principal(&["ROLE_USER"]);

        assert!(p.has_role("USER"));
        assert!(p.has_role("ROLE_USER"));
        assert!(!p.has_role("ADMIN"));
    }

    #[test]
    fn test_bare_authority_is_not_a_role() {
        let p = principal(&["USER"]);

        assert!(p.has_authority("USER"));
        assert!(!p.has_role("USER"));
    }

    #[test]
    fn test_serde_roundtrip_keeps_authorities() {
        let p = principal(&["ROLE_ADMIN", "ROLE_USER"]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Principal = serde_json::from_str(&json).unwrap();

        assert_eq!(back, p);
    }
}
