//! Typed wrappers over [`ApiClient`](crate::api::ApiClient), one module per
//! resource family.
//!
//! Each call carries the fallback message the UI shows when the backend
//! error body has no `message` of its own.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod issues;
pub mod users;

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;
