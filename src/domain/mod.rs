//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - User records and authenticated principals
//! - [`repositories`] - Credential store and user administration traits
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Authentication logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
