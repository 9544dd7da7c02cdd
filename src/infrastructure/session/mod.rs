//! Session storage for authenticated principals.
//!
//! Provides a [`SessionStore`] trait with two implementations:
//! - [`MemorySessionStore`] - Process-local store, the default
//! - [`RedisSessionStore`] - Shared store used when Redis is configured

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use service::{SessionError, SessionResult, SessionStore, generate_session_id};
