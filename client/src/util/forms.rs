//! Form input normalization shared by the pages.
//!
//! Each helper trims input and returns either the request body to send or
//! the message to show inline.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use cityconnect::types::{ISSUE_CATEGORIES, LoginRequest, NewIssue, RegisterRequest};

pub const LOGIN_INCOMPLETE: &str = "Enter both username and password.";
pub const REGISTER_INCOMPLETE: &str = "Username, email and password are all required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const ISSUE_INCOMPLETE: &str = "Title and description are required.";
pub const COMMENT_EMPTY: &str = "Comment cannot be empty.";

pub fn login_request(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LOGIN_INCOMPLETE);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

pub fn register_request(username: &str, email: &str, password: &str) -> Result<RegisterRequest, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(REGISTER_INCOMPLETE);
    }
    validate_email(email)?;
    Ok(RegisterRequest { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Loose shape check; the backend has the final say.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => Ok(()),
        _ => Err(EMAIL_INVALID),
    }
}

/// Build a submission at the default location.
///
/// An unrecognised category falls back to the first one.
pub fn new_issue(title: &str, description: &str, category: &str) -> Result<NewIssue, &'static str> {
    let title = title.trim();
    let description = description.trim();
    if title.is_empty() || description.is_empty() {
        return Err(ISSUE_INCOMPLETE);
    }
    let category = ISSUE_CATEGORIES.iter().find(|c| **c == category).unwrap_or(&ISSUE_CATEGORIES[0]);
    Ok(NewIssue::new(title, description, *category))
}

pub fn comment_content(raw: &str) -> Result<String, &'static str> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(COMMENT_EMPTY);
    }
    Ok(content.to_owned())
}

/// Issue id from the `:id` route segment.
pub fn parse_issue_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok().filter(|id| *id > 0)
}
