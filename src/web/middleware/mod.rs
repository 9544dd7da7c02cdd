//! Web middleware.

pub mod security;
