//! `/users/me` endpoints for the signed-in account.

use crate::api::{ApiClient, ApiError};
use crate::storage::StorageBackend;
use crate::types::{ProfileUpdate, UserProfile};

pub const LOAD_FAILED: &str = "Could not load profile. Please try again.";
pub const UPDATE_FAILED: &str = "Could not update profile. Please try again.";
pub const DELETE_FAILED: &str = "Could not delete account. Please try again.";

const ME: &str = "/users/me";

/// `GET /users/me`.
///
/// # Errors
///
/// Returns [`ApiError`] if the profile cannot be loaded.
pub async fn me<B: StorageBackend>(api: &ApiClient<B>) -> Result<UserProfile, ApiError> {
    api.get(ME, LOAD_FAILED).await
}

/// `PUT /users/me`; returns the profile as stored by the backend.
///
/// # Errors
///
/// Returns [`ApiError`] if the update is rejected (e.g. email already in use).
pub async fn update_me<B: StorageBackend>(api: &ApiClient<B>, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
    api.put(ME, update, UPDATE_FAILED).await
}

/// `DELETE /users/me`.
///
/// # Errors
///
/// Returns [`ApiError`] if the account cannot be deleted.
pub async fn delete_me<B: StorageBackend>(api: &ApiClient<B>) -> Result<(), ApiError> {
    api.delete(ME, DELETE_FAILED).await
}
