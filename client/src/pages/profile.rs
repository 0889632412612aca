//! Own account: view, change email, delete.

use cityconnect::UserProfile;
use cityconnect::notify::Severity;
use leptos::prelude::*;

use crate::state::session::{Api, SessionContext};
use crate::state::toast::{Toasts, notify};
use crate::util::forms::validate_email;

pub const DELETE_CONFIRM: &str =
    "Are you sure you want to delete your account? This action is permanent and cannot be undone.";

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<Toasts>();
    let api = StoredValue::new(expect_context::<Api>());

    let email = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let epoch = session.epoch();
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            let result = cityconnect::services::users::me(&api).await;
            if !session.is_current(epoch) {
                return;
            }
            match result {
                Ok(me) => {
                    email.set(me.email.clone().unwrap_or_default());
                    let merged = UserProfile::merge(session.profile().as_ref(), me);
                    if session.profile().as_ref() != Some(&merged) {
                        if let Err(e) = session.update_profile(merged) {
                            leptos::logging::warn!("could not persist refreshed profile: {e}");
                        }
                    }
                }
                Err(e) => notify(toasts, e.message(), Severity::Error),
            }
            loading.set(false);
        });
    }
    #[cfg(not(feature = "csr"))]
    loading.set(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let value = email.get_untracked().trim().to_owned();
        if let Err(message) = validate_email(&value) {
            notify(toasts, message, Severity::Warning);
            return;
        }
        saving.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let update = cityconnect::types::ProfileUpdate { email: value };
                match cityconnect::services::users::update_me(&api, &update).await {
                    Ok(updated) => match session.update_profile(UserProfile::merge(session.profile().as_ref(), updated)) {
                        Ok(()) => notify(toasts, "Profile updated successfully!", Severity::Success),
                        Err(e) => notify(toasts, format!("Could not save your profile locally: {e}"), Severity::Error),
                    },
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (value, api);
    };

    let on_delete = move |_| {
        if deleting.get_untracked() {
            return;
        }
        #[cfg(feature = "csr")]
        {
            let confirmed =
                web_sys::window().is_some_and(|w| w.confirm_with_message(DELETE_CONFIRM).unwrap_or(false));
            if !confirmed {
                return;
            }
            deleting.set(true);
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                match cityconnect::services::users::delete_me(&api).await {
                    Ok(()) => {
                        notify(toasts, "Your account has been successfully deleted.", Severity::Info);
                        // The guard around this page redirects once the session drops.
                        if let Err(e) = session.logout() {
                            leptos::logging::warn!("logout could not clear stored session: {e}");
                        }
                    }
                    Err(e) => notify(toasts, e.message(), Severity::Error),
                }
                deleting.set(false);
            });
        }
    };

    let username = move || session.profile().map(|p| p.username).unwrap_or_default();
    let role = move || session.profile().map(|p| p.role.to_string()).unwrap_or_default();

    view! {
        <div class="profile-page">
            <h2>"My Profile"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading..."</p> }>
                <form class="profile-card" on:submit=on_save>
                    <h3>"Edit Profile"</h3>
                    <label class="profile-card__label">"Username"</label>
                    <input class="profile-card__input" type="text" prop:value=username disabled=true/>
                    <label class="profile-card__label">"Role"</label>
                    <input class="profile-card__input" type="text" prop:value=role disabled=true/>
                    <label class="profile-card__label">"Email Address"</label>
                    <input
                        class="profile-card__input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || saving.get()
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </form>
                <section class="profile-card profile-card--danger">
                    <h3>"Delete Account"</h3>
                    <p>"Deleting your account removes your profile permanently."</p>
                    <button class="btn btn--danger" on:click=on_delete disabled=move || deleting.get()>
                        {move || if deleting.get() { "Deleting..." } else { "Delete My Account" }}
                    </button>
                </section>
            </Show>
        </div>
    }
}
