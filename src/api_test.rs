use super::*;

#[test]
fn error_message_prefers_backend_message() {
    let body = br#"{"timestamp":"2024-01-01T00:00:00Z","status":409,"error":"Conflict","message":"Username already taken","path":"/api/v1/auth/register"}"#;
    assert_eq!(error_message(body, "Registration failed."), "Username already taken");
}

#[test]
fn error_message_falls_back_without_message_field() {
    assert_eq!(error_message(br#"{"status":500}"#, "Could not load issues."), "Could not load issues.");
}

#[test]
fn error_message_falls_back_on_blank_message() {
    assert_eq!(error_message(br#"{"message":"   "}"#, "fallback"), "fallback");
}

#[test]
fn error_message_falls_back_on_non_json_body() {
    assert_eq!(error_message(b"<html>502 Bad Gateway</html>", "fallback"), "fallback");
    assert_eq!(error_message(b"", "fallback"), "fallback");
}

#[test]
fn endpoint_url_joins_with_single_slash() {
    assert_eq!(endpoint_url("http://h/api/v1/", "/issues"), "http://h/api/v1/issues");
    assert_eq!(endpoint_url("http://h/api/v1", "issues/my"), "http://h/api/v1/issues/my");
}

#[test]
fn api_error_exposes_message_and_status() {
    let err = ApiError::Status { status: 403, message: "Forbidden".to_owned() };
    assert_eq!(err.message(), "Forbidden");
    assert_eq!(err.status(), Some(403));
    assert!(err.is_auth_failure());
    assert_eq!(err.to_string(), "Forbidden");
}
