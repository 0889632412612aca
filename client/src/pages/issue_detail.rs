//! Single issue with its comment thread.
//!
//! The issue and its comments load independently; a failed comment fetch
//! leaves the issue visible and shows a toast instead.

use cityconnect::ClientConfig;
use cityconnect::notify::Severity;
use cityconnect::types::{Comment, Issue};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::issue_table::short_date;
use crate::components::status_chip::StatusChip;
use crate::state::session::{Api, SessionContext};
use crate::state::toast::{Toasts, notify};
use crate::util::forms::{comment_content, parse_issue_id};

#[component]
pub fn IssueDetailPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();
    let api = StoredValue::new(expect_context::<Api>());
    let config = expect_context::<ClientConfig>();
    let params = use_params_map();

    let issue_id = Memo::new(move |_| params.with(|p| parse_issue_id(p.get("id").as_deref())));
    let issue = RwSignal::new(None::<Issue>);
    let comments = RwSignal::new(Vec::<Comment>::new());
    let load_error = RwSignal::new(None::<String>);
    let draft = RwSignal::new(String::new());
    let posting = RwSignal::new(false);

    Effect::new(move || {
        let Some(id) = issue_id.get() else {
            load_error.set(Some("Issue not found.".to_owned()));
            return;
        };
        issue.set(None);
        comments.set(Vec::new());
        load_error.set(None);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            let epoch = session.epoch();
            leptos::task::spawn_local(async move {
                let loaded = cityconnect::services::issues::get(&api, id).await;
                if !session.is_current(epoch) || issue_id.get_untracked() != Some(id) {
                    return;
                }
                match loaded {
                    Ok(found) => issue.set(Some(found)),
                    Err(e) => {
                        load_error.set(Some(e.message().to_owned()));
                        notify(toasts, e.message(), Severity::Error);
                        return;
                    }
                }
                match cityconnect::services::comments::list(&api, id).await {
                    Ok(thread) => comments.set(thread),
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (api, id);
    });

    let on_comment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if posting.get_untracked() {
            return;
        }
        let Some(id) = issue_id.get_untracked() else {
            return;
        };
        let content = match comment_content(&draft.get_untracked()) {
            Ok(content) => content,
            Err(message) => {
                notify(toasts, message, Severity::Warning);
                return;
            }
        };
        posting.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match cityconnect::services::comments::post(&api, id, &content).await {
                    Ok(posted) => {
                        comments.update(|c| c.push(posted));
                        draft.set(String::new());
                        notify(toasts, "Comment posted successfully!", Severity::Success);
                    }
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
                posting.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (api, id, content);
    };

    let issue_view = move || {
        if let Some(message) = load_error.get() {
            return view! { <p class="detail-page__error">{message}</p> }.into_any();
        }
        let Some(issue) = issue.get() else {
            return view! { <p class="page-status">"Loading..."</p> }.into_any();
        };
        let reporter = issue.submitted_by_username.clone().unwrap_or_else(|| "unknown".to_owned());
        let reported = short_date(issue.created_at.as_deref()).to_owned();
        let location = issue.latitude.zip(issue.longitude).map(|(lat, lon)| format!("{lat:.4}, {lon:.4}"));
        let image = issue.image_url.as_deref().map(|path| config.asset_url(path));
        view! {
            <article class="issue-detail">
                <header class="issue-detail__header">
                    <h2>{issue.title}</h2>
                    <StatusChip status=issue.status/>
                </header>
                <p class="issue-detail__meta">
                    {issue.category} " · reported by " {reporter} " on " {reported}
                </p>
                {location.map(|l| view! { <p class="issue-detail__location">"Location: " {l}</p> })}
                {image.map(|src| view! { <img class="issue-detail__image" src=src alt="Issue photo"/> })}
                <p class="issue-detail__description">{issue.description}</p>
            </article>
        }
        .into_any()
    };

    let comment_list = move || {
        comments.with(|thread| {
            if thread.is_empty() {
                return view! { <p class="page-status">"No comments yet."</p> }.into_any();
            }
            thread
                .iter()
                .map(|c| {
                    let at = short_date(c.created_at.as_deref()).to_owned();
                    view! {
                        <li class="comment">
                            <span class="comment__author">{c.username.clone()}</span>
                            <span class="comment__date">{at}</span>
                            <p class="comment__body">{c.content.clone()}</p>
                        </li>
                    }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <div class="detail-page">
            {issue_view}
            <Show when=move || issue.with(Option::is_some)>
                <section class="comments">
                    <h3>"Comments"</h3>
                    <ul class="comments__list">{comment_list}</ul>
                    <form class="comments__form" on:submit=on_comment>
                        <textarea
                            class="comments__input"
                            rows="3"
                            placeholder="Add a comment"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                            disabled=move || posting.get()
                        ></textarea>
                        <button class="btn btn--primary" type="submit" disabled=move || posting.get()>
                            "Post Comment"
                        </button>
                    </form>
                </section>
            </Show>
        </div>
    }
}
