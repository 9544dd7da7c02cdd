//! Server-rendered login flow.
//!
//! # Modules
//!
//! - [`handlers`] - Login page, form processing, logout and landing pages
//! - [`middleware`] - Session resolution and access policy enforcement
//! - [`routes`] - Route configuration
//! - [`session_cookie`] - `SESSION` cookie parsing and formatting

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session_cookie;
