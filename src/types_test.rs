use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_backend_and_short_forms() {
    assert_eq!(Role::from("ROLE_ADMIN"), Role::Admin);
    assert_eq!(Role::from("ADMIN"), Role::Admin);
    assert_eq!(Role::from("admin"), Role::Admin);
    assert_eq!(Role::from("ROLE_CITIZEN"), Role::Regular);
    assert_eq!(Role::from("REGULAR"), Role::Regular);
}

#[test]
fn role_unknown_string_never_grants_admin() {
    assert_eq!(Role::from("ROLE_SUPERUSER"), Role::Regular);
    assert_eq!(Role::from(""), Role::Regular);
}

#[test]
fn role_serializes_to_backend_wire_value() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ROLE_ADMIN\"");
    assert_eq!(serde_json::to_string(&Role::Regular).unwrap(), "\"ROLE_CITIZEN\"");
}

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_serializes_flat_object() {
    let profile = UserProfile::new("alice", Role::Admin).with_email("alice@example.com");
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "username": "alice", "email": "alice@example.com", "role": "ROLE_ADMIN" })
    );
}

#[test]
fn user_profile_tolerates_missing_email_and_role() {
    let profile: UserProfile = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
    assert_eq!(profile, UserProfile::new("bob", Role::Regular));
}

#[test]
fn auth_response_profile_has_no_email() {
    let resp: AuthResponse =
        serde_json::from_str(r#"{"token":"t","username":"carol","role":"ROLE_ADMIN"}"#).unwrap();
    assert_eq!(resp.profile(), UserProfile::new("carol", Role::Admin));
}

#[test]
fn merge_without_current_takes_fetched() {
    let fetched = UserProfile::new("alice", Role::Regular).with_email("a@city.example");
    assert_eq!(UserProfile::merge(None, fetched.clone()), fetched);
}

#[test]
fn merge_keeps_known_email_and_username() {
    let current = UserProfile::new("alice", Role::Regular).with_email("a@city.example");
    let merged = UserProfile::merge(Some(&current), UserProfile::default());
    assert_eq!(merged.username, "alice");
    assert_eq!(merged.email.as_deref(), Some("a@city.example"));
}

#[test]
fn merge_prefers_fetched_role_and_email() {
    let current = UserProfile::new("alice", Role::Regular).with_email("old@city.example");
    let fetched = UserProfile::new("alice", Role::Admin).with_email("new@city.example");
    let merged = UserProfile::merge(Some(&current), fetched);
    assert_eq!(merged.role, Role::Admin);
    assert_eq!(merged.email.as_deref(), Some("new@city.example"));
}

// =============================================================
// IssueStatus
// =============================================================

#[test]
fn issue_status_parse_accepts_wire_and_label() {
    assert_eq!(IssueStatus::parse("IN_PROGRESS"), Some(IssueStatus::InProgress));
    assert_eq!(IssueStatus::parse("in progress"), Some(IssueStatus::InProgress));
    assert_eq!(IssueStatus::parse("resolved"), Some(IssueStatus::Resolved));
    assert_eq!(IssueStatus::parse("closed"), None);
}

#[test]
fn issue_deserializes_backend_payload() {
    let raw = r#"{
        "id": 7,
        "title": "Deep pothole",
        "description": "Near the school gate",
        "category": "Pothole",
        "status": "IN_PROGRESS",
        "latitude": 18.5204,
        "longitude": 73.8567,
        "imageUrl": null,
        "createdAt": "2024-03-01T10:00:00Z",
        "submittedByUsername": "alice"
    }"#;
    let issue: Issue = serde_json::from_str(raw).unwrap();
    assert_eq!(issue.id, 7);
    assert_eq!(issue.status, IssueStatus::InProgress);
    assert_eq!(issue.submitted_by_username.as_deref(), Some("alice"));
    assert!(issue.image_url.is_none());
}

#[test]
fn issue_missing_status_defaults_to_pending() {
    let raw = r#"{"id":1,"title":"t","description":"d","category":"Other"}"#;
    let issue: Issue = serde_json::from_str(raw).unwrap();
    assert_eq!(issue.status, IssueStatus::Pending);
}

#[test]
fn new_issue_uses_default_location_and_camel_case() {
    let issue = NewIssue::new("Broken lamp", "Dark street", ISSUE_CATEGORIES[1]);
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["latitude"], serde_json::json!(DEFAULT_LOCATION.0));
    assert_eq!(json["category"], "Streetlight Out");
    assert!(json.get("imageUrl").is_some());
}

#[test]
fn status_update_body_uses_wire_value() {
    let body = serde_json::to_value(StatusUpdate { status: IssueStatus::Resolved }).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "RESOLVED" }));
}
