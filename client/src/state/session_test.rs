use super::*;
use cityconnect::Role;

#[test]
fn nav_label_is_none_when_signed_out() {
    assert_eq!(nav_label(&SessionState::Anonymous), None);
    assert_eq!(nav_label(&SessionState::Unknown), None);
}

#[test]
fn nav_label_marks_admins() {
    let admin = SessionState::Authenticated(UserProfile::new("root", Role::Admin));
    assert_eq!(nav_label(&admin).as_deref(), Some("root (admin)"));
    let citizen = SessionState::Authenticated(UserProfile::new("alice", Role::Regular));
    assert_eq!(nav_label(&citizen).as_deref(), Some("alice"));
}

#[test]
fn sync_state_skips_identical_state() {
    let owner = Owner::new();
    owner.set();
    let signal = RwSignal::new(SessionState::Anonymous);
    sync_state(signal, SessionState::Anonymous);
    assert_eq!(signal.get_untracked(), SessionState::Anonymous);

    let next = SessionState::Authenticated(UserProfile::new("alice", Role::Regular));
    sync_state(signal, next.clone());
    assert_eq!(signal.get_untracked(), next);
}
