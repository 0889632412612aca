//! Single-slot toast renderer.

use cityconnect::notify::CloseReason;
use leptos::prelude::*;

use crate::state::toast::{Toasts, dismiss};

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    move || {
        toasts.get().current.map(|n| {
            view! {
                <div class=format!("toast toast--{}", n.severity) role="status">
                    <span class="toast__message">{n.message}</span>
                    <button
                        class="toast__close"
                        title="Close"
                        on:click=move |_| dismiss(toasts, CloseReason::Dismissed)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
