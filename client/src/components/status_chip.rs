//! Colored chip for an issue's triage status.

#[cfg(test)]
#[path = "status_chip_test.rs"]
mod status_chip_test;

use cityconnect::types::IssueStatus;
use leptos::prelude::*;

pub fn chip_class(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Pending => "status-chip status-chip--pending",
        IssueStatus::InProgress => "status-chip status-chip--in-progress",
        IssueStatus::Resolved => "status-chip status-chip--resolved",
    }
}

#[component]
pub fn StatusChip(status: IssueStatus) -> impl IntoView {
    view! { <span class=chip_class(status)>{status.label()}</span> }
}
