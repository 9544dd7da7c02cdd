//! Data Transfer Objects for operational endpoints.

pub mod health;
