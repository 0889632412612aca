//! Admin triage: every issue, with status changes and deletion.

#[cfg(test)]
#[path = "admin_dashboard_test.rs"]
mod admin_dashboard_test;

use cityconnect::guard::Route;
use cityconnect::notify::Severity;
use cityconnect::types::{Issue, IssueStatus};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::issue_table::short_date;
use crate::components::status_chip::StatusChip;
use crate::state::session::{Api, SessionContext};
use crate::state::toast::{Toasts, notify};

/// Replace the row for `updated.id`; unknown ids are ignored.
pub fn apply_update(issues: &mut [Issue], updated: Issue) {
    if let Some(slot) = issues.iter_mut().find(|i| i.id == updated.id) {
        *slot = updated;
    }
}

pub fn remove_issue(issues: &mut Vec<Issue>, id: i64) {
    issues.retain(|i| i.id != id);
}

/// Count per status in [`IssueStatus::ALL`] order.
pub fn status_counts(issues: &[Issue]) -> [usize; 3] {
    let mut counts = [0; 3];
    for issue in issues {
        if let Some(idx) = IssueStatus::ALL.iter().position(|s| *s == issue.status) {
            counts[idx] += 1;
        }
    }
    counts
}

#[cfg(feature = "csr")]
fn confirm(message: &str) -> bool {
    web_sys::window().is_some_and(|w| w.confirm_with_message(message).unwrap_or(false))
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();
    let api = StoredValue::new(expect_context::<Api>());

    let issues = RwSignal::new(None::<Vec<Issue>>);
    let load_error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let epoch = session.epoch();
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            let result = cityconnect::services::admin::all_issues(&api).await;
            if !session.is_current(epoch) {
                return;
            }
            match result {
                Ok(list) => issues.set(Some(list)),
                Err(e) => load_error.set(Some(e.message().to_owned())),
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = session;

    let on_status = move |id: i64, raw: String| {
        let Some(status) = IssueStatus::parse(&raw) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match cityconnect::services::admin::update_status(&api, id, status).await {
                    Ok(updated) => {
                        let label = updated.status.label();
                        issues.update(|list| {
                            if let Some(list) = list {
                                apply_update(list, updated);
                            }
                        });
                        notify(toasts, format!("Issue {id} marked {label}."), Severity::Success);
                    }
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (id, status, api, toasts);
    };

    let on_delete = move |id: i64| {
        #[cfg(feature = "csr")]
        {
            if !confirm("Are you sure you want to delete this issue?") {
                return;
            }
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match cityconnect::services::admin::delete(&api, id).await {
                    Ok(()) => {
                        issues.update(|list| {
                            if let Some(list) = list {
                                remove_issue(list, id);
                            }
                        });
                        notify(toasts, format!("Issue {id} deleted."), Severity::Success);
                    }
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = id;
    };

    let summary = move || {
        issues.with(|list| {
            list.as_deref().map(|list| {
                let [pending, in_progress, resolved] = status_counts(list);
                format!("{pending} pending · {in_progress} in progress · {resolved} resolved")
            })
        })
    };

    let rows = move || {
        issues.get().unwrap_or_default().into_iter().map(|issue| {
            let id = issue.id;
            let current = issue.status;
            let options = IssueStatus::ALL
                .into_iter()
                .map(|s| view! { <option value=s.as_wire() selected={s == current}>{s.label()}</option> })
                .collect_view();
            view! {
                <tr>
                    <td>{id}</td>
                    <td>
                        <A href=Route::IssueDetail(id).path()>{issue.title}</A>
                    </td>
                    <td>{issue.category}</td>
                    <td>{issue.submitted_by_username.unwrap_or_default()}</td>
                    <td>{short_date(issue.created_at.as_deref()).to_owned()}</td>
                    <td>
                        <StatusChip status=current/>
                    </td>
                    <td>
                        <select on:change=move |ev| on_status(id, event_target_value(&ev))>{options}</select>
                    </td>
                    <td>
                        <button class="btn btn--danger" on:click=move |_| on_delete(id)>"Delete"</button>
                    </td>
                </tr>
            }
        }).collect_view()
    };

    view! {
        <div class="admin-page">
            <h2>"Admin Dashboard"</h2>
            <p class="admin-page__summary">{summary}</p>
            {move || {
                if let Some(message) = load_error.get() {
                    return view! { <p class="list-page__error">{message}</p> }.into_any();
                }
                if issues.with(Option::is_none) {
                    return view! { <p class="page-status">"Loading..."</p> }.into_any();
                }
                view! {
                    <table class="issue-table issue-table--admin">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Title"</th>
                                <th>"Category"</th>
                                <th>"Reporter"</th>
                                <th>"Reported"</th>
                                <th>"Status"</th>
                                <th>"Change"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            }}
        </div>
    }
}
