//! Operational endpoints and shared HTTP middleware.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - Health check handler
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
