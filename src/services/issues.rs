//! Citizen-facing `/issues` endpoints.

use crate::api::{ApiClient, ApiError};
use crate::storage::StorageBackend;
use crate::types::{Issue, NewIssue};

pub const CREATE_FAILED: &str = "Could not create issue. Please try again.";
pub const MY_ISSUES_FAILED: &str = "Could not load your issues. Please try again.";
pub const GET_FAILED: &str = "Could not load this issue. Please try again.";

pub(crate) fn issue_path(id: i64) -> String {
    format!("/issues/{id}")
}

/// `POST /issues`.
///
/// # Errors
///
/// Returns [`ApiError`] if the backend rejects the submission.
pub async fn create<B: StorageBackend>(api: &ApiClient<B>, issue: &NewIssue) -> Result<Issue, ApiError> {
    api.post("/issues", issue, CREATE_FAILED).await
}

/// `GET /issues/my`: issues reported by the signed-in user.
///
/// # Errors
///
/// Returns [`ApiError`] if the list cannot be loaded.
pub async fn my_issues<B: StorageBackend>(api: &ApiClient<B>) -> Result<Vec<Issue>, ApiError> {
    api.get("/issues/my", MY_ISSUES_FAILED).await
}

/// `GET /issues/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] if the issue does not exist or cannot be loaded.
pub async fn get<B: StorageBackend>(api: &ApiClient<B>, id: i64) -> Result<Issue, ApiError> {
    api.get(&issue_path(id), GET_FAILED).await
}
