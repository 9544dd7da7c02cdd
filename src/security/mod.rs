//! Security configuration: access rules, password encoding, login endpoints.
//!
//! # Modules
//!
//! - [`ant_pattern`] - Ant-style path pattern matcher
//! - [`access_policy`] - Ordered rule table and ignore list
//! - [`password`] - Password encoders (Argon2, plain text)
//! - [`success_handler`] - Post-login redirect selection
//!
//! [`standard_policy`] is the rule table the service runs with.

pub mod access_policy;
pub mod ant_pattern;
pub mod password;
pub mod success_handler;

pub use access_policy::{AccessPolicy, AccessPolicyBuilder, AccessRule, Decision, Requirement};
pub use ant_pattern::{AntPattern, PatternError};
pub use password::{
    Argon2PasswordEncoder, EncoderKind, NoOpPasswordEncoder, PasswordEncoder, PasswordError,
};
pub use success_handler::{AuthenticationSuccessHandler, AuthorityTargetSuccessHandler};

/// Login form page.
pub const LOGIN_PAGE: &str = "/showMyLoginPage";
/// Form POST target that performs authentication.
pub const LOGIN_PROCESSING_URL: &str = "/authenticateTheUser";
/// Session termination endpoint.
pub const LOGOUT_URL: &str = "/logout";
/// Where failed logins land.
pub const LOGIN_FAILURE_URL: &str = "/showMyLoginPage?error";
/// Where logouts land.
pub const LOGOUT_SUCCESS_URL: &str = "/showMyLoginPage?logout";

/// Asset prefixes that bypass the security filter entirely.
pub const IGNORED_PATHS: &[&str] = &[
    "/resources/**",
    "/login/**",
    "/static/**",
    "/Script/**",
    "/Style/**",
    "/Icon/**",
    "/js/**",
    "/vendor/**",
    "/bootstrap/**",
    "/Image/**",
];

/// Paths open to anonymous users.
pub const PUBLIC_PATHS: &[&str] = &[
    "/register",
    "/confirm",
    "/login/**",
    "/css/**",
    "/js/**",
    "/static/**",
    "/vendor/**",
    "/resources/**",
];

/// Builds the service's access policy.
///
/// | Pattern | Requirement |
/// |---|---|
/// | login page, login processing, logout, `/health` | permit all |
/// | `/admin/**` | role `ADMIN` |
/// | `/user/**` | role `USER` |
/// | [`PUBLIC_PATHS`] | permit all |
/// | anything else | authenticated |
///
/// # Errors
///
/// Returns [`PatternError`] if a pattern fails to compile.
pub fn standard_policy() -> Result<AccessPolicy, PatternError> {
    AccessPolicy::builder()
        .ignoring(IGNORED_PATHS.iter().copied())
        .permit_all([LOGIN_PAGE, LOGIN_PROCESSING_URL, LOGOUT_URL, "/health"])
        .has_role(["/admin/**"], "ADMIN")
        .has_role(["/user/**"], "USER")
        .permit_all(PUBLIC_PATHS.iter().copied())
        .build()
}
