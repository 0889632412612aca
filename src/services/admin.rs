//! Admin-only `/admin/issues` endpoints.
//!
//! The backend enforces the role; calling these as a regular user yields a
//! 403 [`ApiError::Status`].

use crate::api::{ApiClient, ApiError};
use crate::storage::StorageBackend;
use crate::types::{Issue, IssueStatus, StatusUpdate};

pub const LIST_FAILED: &str = "Could not load issues. Please try again.";
pub const STATUS_FAILED: &str = "Could not update status. Please try again.";
pub const DELETE_FAILED: &str = "Could not delete issue. Please try again.";

pub(crate) fn admin_issue_path(id: i64) -> String {
    format!("/admin/issues/{id}")
}

/// `GET /admin/issues`: every issue, newest first.
///
/// # Errors
///
/// Returns [`ApiError`] if the list cannot be loaded.
pub async fn all_issues<B: StorageBackend>(api: &ApiClient<B>) -> Result<Vec<Issue>, ApiError> {
    api.get("/admin/issues", LIST_FAILED).await
}

/// `PUT /admin/issues/{id}/status`.
///
/// # Errors
///
/// Returns [`ApiError`] if the issue is missing or the update is rejected.
pub async fn update_status<B: StorageBackend>(api: &ApiClient<B>, id: i64, status: IssueStatus) -> Result<Issue, ApiError> {
    let path = format!("{}/status", admin_issue_path(id));
    api.put(&path, &StatusUpdate { status }, STATUS_FAILED).await
}

/// `DELETE /admin/issues/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] if the issue cannot be deleted.
pub async fn delete<B: StorageBackend>(api: &ApiClient<B>, id: i64) -> Result<(), ApiError> {
    api.delete(&admin_issue_path(id), DELETE_FAILED).await
}
