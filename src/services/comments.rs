//! `/issues/{id}/comments` endpoints.

use crate::api::{ApiClient, ApiError};
use crate::storage::StorageBackend;
use crate::types::{Comment, NewComment};

pub const LIST_FAILED: &str = "Could not load comments. Please try again.";
pub const POST_FAILED: &str = "Could not post comment. Please try again.";

pub(crate) fn comments_path(issue_id: i64) -> String {
    format!("/issues/{issue_id}/comments")
}

/// `GET /issues/{id}/comments`.
///
/// # Errors
///
/// Returns [`ApiError`] if the comments cannot be loaded.
pub async fn list<B: StorageBackend>(api: &ApiClient<B>, issue_id: i64) -> Result<Vec<Comment>, ApiError> {
    api.get(&comments_path(issue_id), LIST_FAILED).await
}

/// `POST /issues/{id}/comments`.
///
/// # Errors
///
/// Returns [`ApiError`] if the backend rejects the comment.
pub async fn post<B: StorageBackend>(api: &ApiClient<B>, issue_id: i64, content: &str) -> Result<Comment, ApiError> {
    let body = NewComment { content: content.to_owned() };
    api.post(&comments_path(issue_id), &body, POST_FAILED).await
}
