//! Shared DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON so serde round-trips stay
//! lossless. Optional fields default when absent because list and detail
//! endpoints do not always populate the same columns.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Authorization role of a user.
///
/// The backend speaks `ROLE_CITIZEN` / `ROLE_ADMIN`. Anything that is not
/// recognisably admin maps to [`Role::Regular`], so an unexpected role string
/// can never unlock admin routes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

impl Role {
    /// Wire representation sent back to the backend and persisted locally.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Regular => "ROLE_CITIZEN",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" | "ROLE_ADMIN" => Self::Admin,
            _ => Self::Regular,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_wire().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Snapshot of the signed-in user, mirrored into the token store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    /// Absent right after login; filled in by `/users/me`.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    #[must_use]
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self { username: username.into(), email: None, role }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Fold a freshly fetched profile over the one the session holds.
    ///
    /// The fetched role always wins. An empty username or a missing email
    /// in `fetched` falls back to the current value.
    #[must_use]
    pub fn merge(current: Option<&Self>, fetched: Self) -> Self {
        let Some(current) = current else {
            return fetched;
        };
        Self {
            username: if fetched.username.is_empty() { current.username.clone() } else { fetched.username },
            email: fetched.email.or_else(|| current.email.clone()),
            role: fetched.role,
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body returned by both `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl AuthResponse {
    /// Profile to hand to the session manager after a successful login.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(self.username.clone(), self.role)
    }
}

/// Body for `PUT /users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
}

// =============================================================================
// ISSUES
// =============================================================================

/// Triage status of an issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    /// Wire value, e.g. `IN_PROGRESS`.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Human label, e.g. `In Progress`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }

    /// Parse either the wire value or the human label, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|status| status.as_wire() == normalized)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Categories offered by the submit form; the first is the default.
pub const ISSUE_CATEGORIES: [&str; 5] = ["Pothole", "Streetlight Out", "Sanitation", "Vandalism", "Other"];

/// Location attached to submissions until a map picker exists.
pub const DEFAULT_LOCATION: (f64, f64) = (18.5204, 73.8567);

/// A reported issue as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Path relative to the backend origin.
    #[serde(default)]
    pub image_url: Option<String>,
    /// ISO-8601 instant as sent by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub submitted_by_username: Option<String>,
}

/// Body for `POST /issues`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

impl NewIssue {
    /// Issue at [`DEFAULT_LOCATION`] with no image.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            latitude: Some(DEFAULT_LOCATION.0),
            longitude: Some(DEFAULT_LOCATION.1),
            image_url: None,
        }
    }
}

/// Body for `PUT /admin/issues/{id}/status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: IssueStatus,
}

// =============================================================================
// COMMENTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub username: String,
    pub issue_id: i64,
}

/// Body for `POST /issues/{id}/comments`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error payload the backend attaches to non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}
