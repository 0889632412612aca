//! Top navigation; links depend on who is signed in.

use cityconnect::notify::Severity;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::{SessionContext, nav_label};
use crate::state::toast::{Toasts, notify};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();

    let signed_in = move || session.state.with(cityconnect::SessionState::is_authenticated);
    let is_admin = move || session.state.with(cityconnect::SessionState::is_admin);
    let label = move || session.state.with(nav_label).unwrap_or_default();

    let on_logout = move |_| {
        // Memory is cleared regardless; only the stored copy may linger.
        if let Err(e) = session.logout() {
            leptos::logging::warn!("logout could not clear stored session: {e}");
        }
        // Guarded pages redirect to /login on their own once the state flips.
        notify(toasts, "You have been logged out.", Severity::Info);
    };

    view! {
        <header class="nav-bar">
            <A href="/" attr:class="nav-bar__brand">"CityConnect"</A>
            <span class="nav-bar__spacer"></span>
            <Show
                when=signed_in
                fallback=|| view! {
                    <A href="/login" attr:class="nav-bar__link">"Login"</A>
                    <A href="/register" attr:class="nav-bar__link">"Sign Up"</A>
                }
            >
                <A href="/" attr:class="nav-bar__link">"Report Issue"</A>
                <A href="/my-issues" attr:class="nav-bar__link">"My Issues"</A>
                <Show when=is_admin>
                    <A href="/admin" attr:class="nav-bar__link">"Admin"</A>
                </Show>
                <A href="/profile" attr:class="nav-bar__link">"Profile"</A>
                <button class="btn nav-bar__logout" on:click=on_logout>
                    {move || format!("Logout ({})", label())}
                </button>
            </Show>
        </header>
    }
}
