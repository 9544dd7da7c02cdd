//! Core business entities.

pub mod principal;
pub mod user;

pub use principal::Principal;
pub use user::{NewUser, UserAccount, UserRecord};
