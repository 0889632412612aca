use super::{admin, comments, issues};

#[test]
fn issue_paths() {
    assert_eq!(issues::issue_path(12), "/issues/12");
    assert_eq!(comments::comments_path(12), "/issues/12/comments");
    assert_eq!(admin::admin_issue_path(12), "/admin/issues/12");
}

#[test]
fn fallback_messages_are_user_facing() {
    for message in [
        issues::CREATE_FAILED,
        issues::MY_ISSUES_FAILED,
        issues::GET_FAILED,
        comments::LIST_FAILED,
        comments::POST_FAILED,
        admin::LIST_FAILED,
        admin::STATUS_FAILED,
        admin::DELETE_FAILED,
    ] {
        assert!(message.ends_with("Please try again."), "{message}");
    }
}
