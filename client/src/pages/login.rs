//! Username + password sign-in.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::{Api, SessionContext};
use crate::state::toast::{Toasts, error};
use crate::util::forms::login_request;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match login_request(&username.get_untracked(), &password.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                error(toasts, message);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match cityconnect::services::auth::login(&api, &request).await {
                    Ok(resp) => match session.login(cityconnect::Credential::new(resp.token.clone()), resp.profile()) {
                        Ok(()) => {
                            crate::state::toast::success(toasts, "Login successful! Welcome back.");
                            navigate("/", leptos_router::NavigateOptions::default());
                        }
                        Err(e) => error(toasts, format!("Could not save your session: {e}")),
                    },
                    Err(e) => error(toasts, e.message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (request, &api, &navigate, session);
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign In"</h1>
                <input
                    class="auth-input"
                    type="text"
                    autocomplete="username"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                    disabled=move || busy.get()
                />
                <input
                    class="auth-input"
                    type="password"
                    autocomplete="current-password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    disabled=move || busy.get()
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing In..." } else { "Sign In" }}
                </button>
                <A href="/register" attr:class="auth-card__switch">"Don't have an account? Sign Up"</A>
            </form>
        </div>
    }
}
