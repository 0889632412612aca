//! `/auth` endpoints.
//!
//! Both calls return the credential; callers hand it to
//! [`SessionManager::login`](crate::session::SessionManager::login) together
//! with [`AuthResponse::profile`].

use crate::api::{ApiClient, ApiError};
use crate::storage::StorageBackend;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};

pub const LOGIN_FAILED: &str = "Login failed. Please check your network and try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// `POST /auth/login`.
///
/// # Errors
///
/// Returns [`ApiError`] when the backend rejects the credentials or is unreachable.
pub async fn login<B: StorageBackend>(api: &ApiClient<B>, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
    api.post("/auth/login", request, LOGIN_FAILED).await
}

/// `POST /auth/register`.
///
/// # Errors
///
/// Returns [`ApiError`] when registration is rejected (e.g. duplicate username).
pub async fn register<B: StorageBackend>(
    api: &ApiClient<B>,
    request: &RegisterRequest,
) -> Result<AuthResponse, ApiError> {
    api.post("/auth/register", request, REGISTER_FAILED).await
}
