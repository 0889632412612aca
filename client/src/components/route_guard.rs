//! Guard wrappers for protected pages.
//!
//! Both re-run their guard whenever the session signal changes, so a logout
//! on any page sends the user to `/login` without a reload.

use cityconnect::SessionState;
use cityconnect::guard::{ACCESS_DENIED_DETAIL, GuardOutcome, require_admin, require_authenticated};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionContext;

type Guard = fn(&SessionState) -> GuardOutcome<()>;

fn authenticated(state: &SessionState) -> GuardOutcome<()> {
    require_authenticated(state, || ())
}

fn admin(state: &SessionState) -> GuardOutcome<()> {
    require_admin(state, || ())
}

/// Render `children` only for a signed-in user.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(authenticated, children)
}

/// Render `children` only for an admin; others see an access-denied notice.
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    guarded(admin, children)
}

fn guarded(guard: Guard, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    Effect::new(move || {
        if session.state.with(guard) == GuardOutcome::RedirectToLogin {
            navigate("/login", NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match session.state.with(guard) {
        GuardOutcome::Allow(()) => children().into_any(),
        GuardOutcome::RedirectToLogin => view! { <p class="page-status">"Redirecting to login..."</p> }.into_any(),
        GuardOutcome::Forbidden(message) => view! {
            <div class="access-denied">
                <h2>{message}</h2>
                <p>{ACCESS_DENIED_DETAIL}</p>
            </div>
        }
        .into_any(),
    }
}
