//! Account creation; signs the new user straight in.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::{Api, SessionContext};
use crate::state::toast::Toasts;
use crate::util::forms::register_request;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        form_error.set(None);
        let request = match register_request(&username.get_untracked(), &email.get_untracked(), &password.get_untracked())
        {
            Ok(request) => request,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match cityconnect::services::auth::register(&api, &request).await {
                    Ok(resp) => {
                        let profile = resp.profile().with_email(request.email.clone());
                        match session.login(cityconnect::Credential::new(resp.token), profile) {
                            Ok(()) => {
                                crate::state::toast::success(toasts, "Registration successful! Welcome to CityConnect.");
                                navigate("/", leptos_router::NavigateOptions::default());
                            }
                            Err(e) => form_error.set(Some(format!("Could not save your session: {e}"))),
                        }
                    }
                    Err(e) => form_error.set(Some(e.message().to_owned())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (request, &api, &navigate, session, toasts);
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign Up"</h1>
                <Show when=move || form_error.with(Option::is_some)>
                    <p class="auth-card__error">{move || form_error.get().unwrap_or_default()}</p>
                </Show>
                <input
                    class="auth-input"
                    type="text"
                    autocomplete="username"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="email"
                    autocomplete="email"
                    placeholder="Email Address"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    autocomplete="new-password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing Up..." } else { "Sign Up" }}
                </button>
                <A href="/login" attr:class="auth-card__switch">"Already have an account? Sign In"</A>
            </form>
        </div>
    }
}
