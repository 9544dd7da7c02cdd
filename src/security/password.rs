//! Password comparison strategies.
//!
//! [`Argon2PasswordEncoder`] is the default. [`NoOpPasswordEncoder`] compares
//! plain text and exists only so rows stored verbatim by older deployments
//! keep working; select it with `PASSWORD_ENCODER=noop`.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("unknown password encoder '{0}', expected 'argon2' or 'noop'")]
    UnknownEncoder(String),
}

/// Encodes raw passwords for storage and checks presented passwords against
/// stored values.
pub trait PasswordEncoder: Send + Sync {
    /// Encodes a raw password into its stored form.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Hash`] if the underlying hasher fails.
    fn encode(&self, raw: &str) -> Result<String, PasswordError>;

    /// Returns `true` if `raw` corresponds to `stored`.
    fn matches(&self, raw: &str, stored: &str) -> bool;
}

/// Plain-text identity comparison. Stores and compares passwords verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, PasswordError> {
        Ok(raw.to_string())
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        raw == stored
    }
}

/// Argon2id with a random per-password salt, stored as a PHC string.
#[derive(Default, Clone)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// The encoders selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderKind {
    #[default]
    Argon2,
    NoOp,
}

impl EncoderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Argon2 => "argon2",
            Self::NoOp => "noop",
        }
    }

    /// Instantiates the encoder.
    pub fn build(self) -> Arc<dyn PasswordEncoder> {
        match self {
            Self::Argon2 => Arc::new(Argon2PasswordEncoder::new()),
            Self::NoOp => Arc::new(NoOpPasswordEncoder),
        }
    }
}

impl FromStr for EncoderKind {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" => Ok(Self::Argon2),
            "noop" | "plain" => Ok(Self::NoOp),
            other => Err(PasswordError::UnknownEncoder(other.to_string())),
        }
    }
}
