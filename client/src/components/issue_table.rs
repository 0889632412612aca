//! Read-only table of issues linking to their detail pages.

#[cfg(test)]
#[path = "issue_table_test.rs"]
mod issue_table_test;

use cityconnect::guard::Route;
use cityconnect::types::Issue;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::status_chip::StatusChip;

/// Date part of an ISO-8601 instant, or `-` when unknown.
pub fn short_date(created_at: Option<&str>) -> &str {
    match created_at {
        Some(at) => at.split_once('T').map_or(at, |(date, _)| date),
        None => "-",
    }
}

#[component]
pub fn IssueTable(issues: Vec<Issue>) -> impl IntoView {
    let rows = issues
        .into_iter()
        .map(|issue| {
            let href = Route::IssueDetail(issue.id).path();
            let date = short_date(issue.created_at.as_deref()).to_owned();
            view! {
                <tr>
                    <td>{issue.id}</td>
                    <td>
                        <A href=href>{issue.title}</A>
                    </td>
                    <td>{issue.category}</td>
                    <td>
                        <StatusChip status=issue.status/>
                    </td>
                    <td>{date}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="issue-table">
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Title"</th>
                    <th>"Category"</th>
                    <th>"Status"</th>
                    <th>"Reported"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
