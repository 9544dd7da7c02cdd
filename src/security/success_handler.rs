//! Post-login redirect selection.

use crate::domain::entities::Principal;

/// Chooses where the browser goes after a successful login.
pub trait AuthenticationSuccessHandler: Send + Sync {
    /// Returns the redirect target for a freshly authenticated principal.
    fn target_url(&self, principal: &Principal) -> String;
}

/// Redirects by the first configured authority the principal holds.
///
/// Targets are checked in insertion order, so list the most privileged
/// authority first.
#[derive(Debug, Clone)]
pub struct AuthorityTargetSuccessHandler {
    targets: Vec<(String, String)>,
    default_url: String,
}

impl AuthorityTargetSuccessHandler {
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            targets: Vec::new(),
            default_url: default_url.into(),
        }
    }

    /// Sends principals holding `authority` to `url`.
    #[must_use]
    pub fn target(mut self, authority: impl Into<String>, url: impl Into<String>) -> Self {
        self.targets.push((authority.into(), url.into()));
        self
    }
}

impl Default for AuthorityTargetSuccessHandler {
    /// `ROLE_ADMIN` to `/admin/home`, `ROLE_USER` to `/user/home`, anything else to `/`.
    fn default() -> Self {
        Self::new("/")
            .target("ROLE_ADMIN", "/admin/home")
            .target("ROLE_USER", "/user/home")
    }
}

impl AuthenticationSuccessHandler for AuthorityTargetSuccessHandler {
    fn target_url(&self, principal: &Principal) -> String {
        self.targets
            .iter()
            .find(|(authority, _)| principal.has_authority(authority))
            .map_or_else(|| self.default_url.clone(), |(_, url)| url.clone())
    }
}
