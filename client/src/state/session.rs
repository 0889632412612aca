//! Reactive session context for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The [`SessionManager`] owns the credential; `state` mirrors its
//! observable state so guards, the navigation bar, and pages re-render on
//! every transition. All mutations go through this type to keep the two in
//! step.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use cityconnect::{ApiClient, Credential, SessionError, SessionManager, SessionState, TokenStore, UserProfile};
use leptos::prelude::*;

use crate::util::browser_storage::BrowserStorage;

/// API client type shared through context.
pub type Api = ApiClient<BrowserStorage>;

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
    manager: StoredValue<SessionManager<BrowserStorage>>,
}

impl SessionContext {
    /// Restore the session from `store` and start observing it.
    pub fn restore(store: TokenStore<BrowserStorage>) -> Self {
        let manager = SessionManager::restore(store);
        let state = RwSignal::new(manager.state().clone());
        Self { state, manager: StoredValue::new(manager) }
    }

    pub fn login(&self, credential: Credential, profile: UserProfile) -> Result<(), SessionError> {
        self.mutate(move |m| m.login(credential, profile))
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.mutate(SessionManager::logout)
    }

    pub fn update_profile(&self, profile: UserProfile) -> Result<(), SessionError> {
        self.mutate(move |m| m.update_profile(profile))
    }

    /// Current transition counter; pair with [`Self::is_current`].
    pub fn epoch(&self) -> u64 {
        self.manager.with_value(SessionManager::epoch)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.manager.with_value(|m| m.is_current(epoch))
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.with(|s| s.profile().cloned())
    }

    fn mutate(
        &self,
        op: impl FnOnce(&mut SessionManager<BrowserStorage>) -> Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        let mut result = Ok(());
        let mut next = None;
        self.manager.update_value(|m| {
            result = op(m);
            next = Some(m.state().clone());
        });
        if let Some(next) = next {
            sync_state(self.state, next);
        }
        result
    }
}

/// Write `next` only when it differs, so unchanged state does not re-run effects.
fn sync_state(signal: RwSignal<SessionState>, next: SessionState) {
    if signal.with_untracked(|current| *current != next) {
        signal.set(next);
    }
}

/// Display name for the navigation bar.
pub fn nav_label(state: &SessionState) -> Option<String> {
    let profile = state.profile()?;
    Some(if profile.role.is_admin() { format!("{} (admin)", profile.username) } else { profile.username.clone() })
}
