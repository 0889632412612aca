use super::*;

#[test]
fn default_is_closed() {
    assert!(!NotificationState::default().is_open());
}

#[test]
fn show_replaces_current() {
    let mut state = NotificationState::default();
    state.success("Login successful! Welcome back.");
    state.error("Could not load issues. Please try again.");
    let current = state.current.unwrap();
    assert_eq!(current.severity, Severity::Error);
    assert_eq!(current.message, "Could not load issues. Please try again.");
}

#[test]
fn click_away_does_not_close() {
    let mut state = NotificationState::default();
    state.success("saved");
    state.close(CloseReason::ClickAway);
    assert!(state.is_open());
    state.close(CloseReason::Dismissed);
    assert!(!state.is_open());
}

#[test]
fn stale_timer_does_not_close_newer_toast() {
    let mut state = NotificationState::default();
    let first = state.success("first");
    let second = state.show("second", Severity::Warning);
    assert_ne!(first, second);

    state.close_if_current(first, CloseReason::Timeout);
    assert_eq!(state.current.as_ref().map(|n| n.id), Some(second));

    state.close_if_current(second, CloseReason::Timeout);
    assert!(!state.is_open());
}

#[test]
fn severity_strings() {
    assert_eq!(Severity::default(), Severity::Success);
    assert_eq!(Severity::Warning.to_string(), "warning");
}
