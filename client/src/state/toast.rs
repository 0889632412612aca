//! Toast helpers over the shared [`NotificationState`] signal.

use cityconnect::notify::{CloseReason, NotificationState, Severity};
#[cfg(feature = "csr")]
use cityconnect::notify::AUTO_HIDE_MS;
use leptos::prelude::*;

pub type Toasts = RwSignal<NotificationState>;

/// Show `message` and schedule its auto-hide.
pub fn notify(toasts: Toasts, message: impl Into<String>, severity: Severity) {
    let mut id = 0;
    toasts.update(|t| id = t.show(message, severity));

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(AUTO_HIDE_MS).await;
        toasts.update(|t| t.close_if_current(id, CloseReason::Timeout));
    });
    #[cfg(not(feature = "csr"))]
    let _ = id;
}

pub fn success(toasts: Toasts, message: impl Into<String>) {
    notify(toasts, message, Severity::Success);
}

pub fn error(toasts: Toasts, message: impl Into<String>) {
    notify(toasts, message, Severity::Error);
}

pub fn dismiss(toasts: Toasts, reason: CloseReason) {
    toasts.update(|t| t.close(reason));
}
