//! Route table and navigation guards.
//!
//! Guards are pure functions of the current [`SessionState`]: they hold no
//! cache and have no side effects, so front-ends re-run them on every state
//! change and every navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::fmt;

use crate::session::SessionState;

/// Message shown in place of an admin page for signed-in non-admins.
pub const ACCESS_DENIED: &str = "Access Denied";
/// Secondary line under [`ACCESS_DENIED`].
pub const ACCESS_DENIED_DETAIL: &str = "You do not have permission to view this page.";

/// Result of evaluating a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// Render the protected content.
    Allow(T),
    /// Navigate to `/login`, replacing the current history entry.
    RedirectToLogin,
    /// Render a permission-denied message in place.
    Forbidden(String),
}

impl<T> GuardOutcome<T> {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Swap the allowed content, keeping denials as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GuardOutcome<U> {
        match self {
            Self::Allow(content) => GuardOutcome::Allow(f(content)),
            Self::RedirectToLogin => GuardOutcome::RedirectToLogin,
            Self::Forbidden(message) => GuardOutcome::Forbidden(message),
        }
    }
}

/// Allow any signed-in user; everyone else goes to login.
///
/// `content` is only built when access is granted.
pub fn require_authenticated<T>(state: &SessionState, content: impl FnOnce() -> T) -> GuardOutcome<T> {
    match state {
        SessionState::Authenticated(_) => GuardOutcome::Allow(content()),
        SessionState::Unknown | SessionState::Anonymous => GuardOutcome::RedirectToLogin,
    }
}

/// Allow admins; send anonymous users to login and deny everyone else.
pub fn require_admin<T>(state: &SessionState, content: impl FnOnce() -> T) -> GuardOutcome<T> {
    match state {
        SessionState::Authenticated(profile) if profile.role.is_admin() => GuardOutcome::Allow(content()),
        SessionState::Authenticated(_) => GuardOutcome::Forbidden(ACCESS_DENIED.to_owned()),
        SessionState::Unknown | SessionState::Anonymous => GuardOutcome::RedirectToLogin,
    }
}

/// Access policy attached to a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePolicy {
    Public,
    Authenticated,
    Admin,
}

impl RoutePolicy {
    /// Evaluate this policy against `state`.
    pub fn evaluate<T>(self, state: &SessionState, content: impl FnOnce() -> T) -> GuardOutcome<T> {
        match self {
            Self::Public => GuardOutcome::Allow(content()),
            Self::Authenticated => require_authenticated(state, content),
            Self::Admin => require_admin(state, content),
        }
    }
}

/// Client-visible routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    /// `/`: the issue submission form.
    Submit,
    MyIssues,
    IssueDetail(i64),
    Admin,
    Profile,
    NotFound(String),
}

impl Route {
    /// Resolve a path (query and fragment ignored) to a route.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Submit,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/my-issues" => Self::MyIssues,
            "/admin" => Self::Admin,
            "/profile" => Self::Profile,
            other => other
                .strip_prefix("/issue/")
                .and_then(|id| id.parse::<i64>().ok())
                .map_or_else(|| Self::NotFound(path.to_owned()), Self::IssueDetail),
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Submit => "/".to_owned(),
            Self::MyIssues => "/my-issues".to_owned(),
            Self::IssueDetail(id) => format!("/issue/{id}"),
            Self::Admin => "/admin".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::NotFound(path) => path.clone(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RoutePolicy {
        match self {
            Self::Login | Self::Register | Self::NotFound(_) => RoutePolicy::Public,
            Self::Submit | Self::MyIssues | Self::IssueDetail(_) | Self::Profile => RoutePolicy::Authenticated,
            Self::Admin => RoutePolicy::Admin,
        }
    }

    /// Evaluate this route's policy against `state`.
    pub fn guard<T>(&self, state: &SessionState, content: impl FnOnce() -> T) -> GuardOutcome<T> {
        self.policy().evaluate(state, content)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
