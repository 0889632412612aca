use super::*;
use crate::types::{Role, UserProfile};

fn signed_in(role: Role) -> SessionState {
    SessionState::Authenticated(UserProfile::new("alice", role))
}

// =============================================================
// require_authenticated
// =============================================================

#[test]
fn authenticated_guard_allows_any_signed_in_user() {
    assert_eq!(require_authenticated(&signed_in(Role::Regular), || "page"), GuardOutcome::Allow("page"));
    assert_eq!(require_authenticated(&signed_in(Role::Admin), || "page"), GuardOutcome::Allow("page"));
}

#[test]
fn authenticated_guard_redirects_anonymous_and_unknown() {
    assert_eq!(require_authenticated(&SessionState::Anonymous, || "page"), GuardOutcome::RedirectToLogin);
    assert_eq!(require_authenticated(&SessionState::Unknown, || "page"), GuardOutcome::RedirectToLogin);
}

#[test]
fn denied_guard_never_builds_content() {
    let outcome = require_authenticated(&SessionState::Anonymous, || -> &'static str { panic!("content built") });
    assert_eq!(outcome, GuardOutcome::RedirectToLogin);
}

// =============================================================
// require_admin
// =============================================================

#[test]
fn admin_guard_outcomes() {
    assert_eq!(require_admin(&signed_in(Role::Admin), || ()), GuardOutcome::Allow(()));
    assert_eq!(
        require_admin(&signed_in(Role::Regular), || ()),
        GuardOutcome::Forbidden(ACCESS_DENIED.to_owned())
    );
    assert_eq!(require_admin(&SessionState::Anonymous, || ()), GuardOutcome::RedirectToLogin);
}

#[test]
fn guards_are_idempotent() {
    let state = signed_in(Role::Regular);
    let first = require_admin(&state, || 1);
    let second = require_admin(&state, || 1);
    assert_eq!(first, second);
}

#[test]
fn guard_outcome_map_keeps_denials() {
    let forbidden: GuardOutcome<i32> = GuardOutcome::Forbidden("no".to_owned());
    assert_eq!(forbidden.map(|n| n + 1), GuardOutcome::Forbidden("no".to_owned()));
    assert_eq!(GuardOutcome::Allow(1).map(|n| n + 1), GuardOutcome::Allow(2));
}

// =============================================================
// Route table
// =============================================================

#[test]
fn parse_known_routes() {
    assert_eq!(Route::parse("/"), Route::Submit);
    assert_eq!(Route::parse(""), Route::Submit);
    assert_eq!(Route::parse("/login"), Route::Login);
    assert_eq!(Route::parse("/register/"), Route::Register);
    assert_eq!(Route::parse("/my-issues?page=2"), Route::MyIssues);
    assert_eq!(Route::parse("/issue/42"), Route::IssueDetail(42));
    assert_eq!(Route::parse("/admin"), Route::Admin);
    assert_eq!(Route::parse("/profile#email"), Route::Profile);
}

#[test]
fn parse_unknown_and_bad_ids_are_not_found() {
    assert_eq!(Route::parse("/issue/abc"), Route::NotFound("/issue/abc".to_owned()));
    assert_eq!(Route::parse("/nowhere"), Route::NotFound("/nowhere".to_owned()));
}

#[test]
fn path_round_trips() {
    for route in [
        Route::Login,
        Route::Register,
        Route::Submit,
        Route::MyIssues,
        Route::IssueDetail(9),
        Route::Admin,
        Route::Profile,
    ] {
        assert_eq!(Route::parse(&route.path()), route);
    }
}

#[test]
fn policies_match_route_table() {
    assert_eq!(Route::Login.policy(), RoutePolicy::Public);
    assert_eq!(Route::Register.policy(), RoutePolicy::Public);
    assert_eq!(Route::Submit.policy(), RoutePolicy::Authenticated);
    assert_eq!(Route::MyIssues.policy(), RoutePolicy::Authenticated);
    assert_eq!(Route::IssueDetail(1).policy(), RoutePolicy::Authenticated);
    assert_eq!(Route::Profile.policy(), RoutePolicy::Authenticated);
    assert_eq!(Route::Admin.policy(), RoutePolicy::Admin);
}

// =============================================================
// scenarios
// =============================================================

#[test]
fn scenario_regular_user_to_admin_is_forbidden() {
    let outcome = Route::parse("/admin").guard(&signed_in(Role::Regular), || "dashboard");
    assert_eq!(outcome, GuardOutcome::Forbidden("Access Denied".to_owned()));
}

#[test]
fn scenario_login_as_admin_then_admin_route_allowed() {
    use crate::credential::Credential;
    use crate::session::SessionManager;
    use crate::storage::MemoryStorage;
    use crate::token_store::TokenStore;

    let mut manager = SessionManager::new(TokenStore::new(MemoryStorage::new()));
    manager.login(Credential::new("tok123"), UserProfile::new("alice", Role::Admin)).unwrap();
    assert!(manager.state().is_authenticated());
    assert_eq!(Route::parse("/admin").guard(manager.state(), || "dashboard"), GuardOutcome::Allow("dashboard"));
}

#[test]
fn public_routes_allow_everyone() {
    assert!(Route::Login.guard(&SessionState::Anonymous, || ()).is_allowed());
    assert!(Route::Register.guard(&signed_in(Role::Regular), || ()).is_allowed());
}
