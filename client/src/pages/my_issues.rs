//! Issues reported by the signed-in user.

use cityconnect::types::Issue;
use leptos::prelude::*;

use crate::components::issue_table::IssueTable;
use crate::state::session::{Api, SessionContext};

#[component]
pub fn MyIssuesPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = expect_context::<Api>();

    let issues = RwSignal::new(None::<Vec<Issue>>);
    let load_error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let epoch = session.epoch();
        leptos::task::spawn_local(async move {
            let result = cityconnect::services::issues::my_issues(&api).await;
            // A response for a previous user must not render for the next one.
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
    let _ = (session, api);

    view! {
        <div class="list-page">
            <h2>"My Reported Issues"</h2>
            {move || {
                if let Some(message) = load_error.get() {
                    return view! { <p class="list-page__error">{message}</p> }.into_any();
                }
                match issues.get() {
                    None => view! { <p class="page-status">"Loading..."</p> }.into_any(),
                    Some(list) if list.is_empty() => {
                        view! { <p class="page-status">"You have not reported any issues yet."</p> }.into_any()
                    }
                    Some(list) => view! { <IssueTable issues=list/> }.into_any(),
                }
            }}
        </div>
    }
}
