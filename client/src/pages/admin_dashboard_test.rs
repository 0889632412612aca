use super::*;

fn issue(id: i64, status: IssueStatus) -> Issue {
    Issue {
        id,
        title: format!("issue {id}"),
        description: String::new(),
        category: "Other".into(),
        status,
        latitude: None,
        longitude: None,
        image_url: None,
        created_at: None,
        submitted_by_username: None,
    }
}

#[test]
fn apply_update_replaces_matching_row() {
    let mut list = vec![issue(1, IssueStatus::Pending), issue(2, IssueStatus::Pending)];
    apply_update(&mut list, issue(2, IssueStatus::Resolved));
    assert_eq!(list[0].status, IssueStatus::Pending);
    assert_eq!(list[1].status, IssueStatus::Resolved);
}

#[test]
fn apply_update_ignores_unknown_id() {
    let mut list = vec![issue(1, IssueStatus::Pending)];
    apply_update(&mut list, issue(9, IssueStatus::Resolved));
    assert_eq!(list, vec![issue(1, IssueStatus::Pending)]);
}

#[test]
fn remove_issue_drops_only_that_id() {
    let mut list = vec![issue(1, IssueStatus::Pending), issue(2, IssueStatus::InProgress)];
    remove_issue(&mut list, 1);
    assert_eq!(list.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn status_counts_follow_declaration_order() {
    let list = vec![
        issue(1, IssueStatus::Pending),
        issue(2, IssueStatus::InProgress),
        issue(3, IssueStatus::InProgress),
        issue(4, IssueStatus::Resolved),
    ];
    assert_eq!(status_counts(&list), [1, 2, 1]);
}
