//! Ordered path-pattern access rules.
//!
//! An [`AccessPolicy`] is built once at startup and shared read-only by the
//! request filter. Rules are evaluated top to bottom and the first rule with
//! a matching pattern decides; a path no rule matches requires an
//! authenticated principal with any authorities.
//!
//! The ignore list is separate from the rule table: ignored paths skip the
//! filter entirely (no session lookup, no principal), whereas a
//! [`Requirement::PermitAll`] rule is evaluated and then allows the request.

use super::ant_pattern::{AntPattern, PatternError};
use crate::domain::entities::Principal;

/// What a matching rule demands of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, authenticated or not.
    PermitAll,
    /// Any authenticated principal.
    Authenticated,
    /// A principal holding `ROLE_<role>`.
    Role(String),
    /// A principal holding this exact authority.
    Authority(String),
}

impl Requirement {
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role(role.into())
    }

    pub fn authority(authority: impl Into<String>) -> Self {
        Self::Authority(authority.into())
    }
}

/// Outcome of evaluating a request path against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through.
    Permit,
    /// No principal and one is required; send to the login page.
    Unauthenticated,
    /// A principal is present but lacks the required role or authority.
    Denied,
}

/// One row of the rule table.
#[derive(Debug, Clone)]
pub struct AccessRule {
    patterns: Vec<AntPattern>,
    requirement: Requirement,
}

impl AccessRule {
    fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(AntPattern::as_str)
    }
}

/// Immutable ignore list plus ordered rule table.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    ignored: Vec<AntPattern>,
    rules: Vec<AccessRule>,
    default_requirement: Requirement,
}

impl AccessPolicy {
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    /// Returns `true` if the path bypasses the filter.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored.iter().any(|p| p.matches(path))
    }

    /// The requirement of the first rule matching `path`, or the default.
    pub fn requirement_for(&self, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(&self.default_requirement, AccessRule::requirement)
    }

    /// Decides whether a request for `path` made by `principal` may proceed.
    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> Decision {
        let satisfied = match (self.requirement_for(path), principal) {
            (Requirement::PermitAll, _) => return Decision::Permit,
            (_, None) => return Decision::Unauthenticated,
            (Requirement::Authenticated, Some(_)) => true,
            (Requirement::Role(role), Some(p)) => p.has_role(role),
            (Requirement::Authority(authority), Some(p)) => p.has_authority(authority),
        };

        if satisfied {
            Decision::Permit
        } else {
            Decision::Denied
        }
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }
}

/// Collects patterns and compiles them into an [`AccessPolicy`].
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    ignored: Vec<String>,
    rules: Vec<(Vec<String>, Requirement)>,
}

impl AccessPolicyBuilder {
    /// Adds patterns that bypass the filter entirely.
    pub fn ignoring<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Appends a rule. Rules are evaluated in the order they are added.
    pub fn rule<I, S>(mut self, patterns: I, requirement: Requirement) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .push((patterns.into_iter().map(Into::into).collect(), requirement));
        self
    }

    pub fn permit_all<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(patterns, Requirement::PermitAll)
    }

    pub fn has_role<I, S>(self, patterns: I, role: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(patterns, Requirement::role(role))
    }

    /// Compiles every pattern.
    ///
    /// Unmatched paths default to [`Requirement::Authenticated`].
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for the first pattern that fails to compile.
    pub fn build(self) -> Result<AccessPolicy, PatternError> {
        let ignored = compile(&self.ignored)?;
        let rules = self
            .rules
            .into_iter()
            .map(|(patterns, requirement)| {
                Ok(AccessRule {
                    patterns: compile(&patterns)?,
                    requirement,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        Ok(AccessPolicy {
            ignored,
            rules,
            default_requirement: Requirement::Authenticated,
        })
    }
}

fn compile(patterns: &[String]) -> Result<Vec<AntPattern>, PatternError> {
    patterns.iter().map(|p| AntPattern::new(p)).collect()
}
