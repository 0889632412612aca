//! Report-an-issue form; the authenticated landing page.

use cityconnect::types::ISSUE_CATEGORIES;
use leptos::prelude::*;

use crate::state::session::Api;
use crate::state::toast::{Toasts, error};
use crate::util::forms::new_issue;

#[component]
pub fn SubmitPage() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let api = expect_context::<Api>();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(ISSUE_CATEGORIES[0].to_owned());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let issue = match new_issue(&title.get_untracked(), &description.get_untracked(), &category.get_untracked()) {
            Ok(issue) => issue,
            Err(message) => {
                error(toasts, message);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match cityconnect::services::issues::create(&api, &issue).await {
                    Ok(created) => {
                        crate::state::toast::success(toasts, format!("Successfully submitted issue! ID: {}", created.id));
                        title.set(String::new());
                        description.set(String::new());
                        category.set(ISSUE_CATEGORIES[0].to_owned());
                    }
                    Err(e) => error(toasts, e.message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (issue, &api);
    };

    let options = ISSUE_CATEGORIES
        .iter()
        .map(|c| view! { <option value=*c>{*c}</option> })
        .collect_view();

    view! {
        <div class="submit-page">
            <form class="issue-form" on:submit=on_submit>
                <h2>"Report a New Issue"</h2>
                <input
                    class="issue-form__input"
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                    disabled=move || busy.get()
                />
                <textarea
                    class="issue-form__input"
                    rows="4"
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                    disabled=move || busy.get()
                ></textarea>
                <select
                    class="issue-form__input"
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                    disabled=move || busy.get()
                >
                    {options}
                </select>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Submitting..." } else { "Submit Issue" }}
                </button>
            </form>
        </div>
    }
}
