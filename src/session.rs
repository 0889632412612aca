//! Session state machine over the token store.
//!
//! ARCHITECTURE
//! ============
//! `Unknown` is the state before the store has been read. Initialization
//! resolves it to `Anonymous` or `Authenticated`; afterwards only `login`,
//! `logout`, and `update_profile` move the machine. All side effects land in
//! the token store; nothing here touches the network.
//!
//! INVARIANTS
//! ==========
//! - `Authenticated` holds iff a credential is held in memory. A stored
//!   profile without a usable credential is logged-out.
//! - After every successful mutation the persisted pair equals the in-memory
//!   pair.
//! - An expired or undecodable stored credential is cleared at load and
//!   never surfaces as an error.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::clock;
use crate::credential::Credential;
use crate::storage::{StorageBackend, StorageError};
use crate::token_store::TokenStore;
use crate::types::UserProfile;

/// Errors produced by session transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The token store could not be written.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// A profile update was attempted without a signed-in user.
    #[error("no authenticated session")]
    NotAuthenticated,
}

/// Observable authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The token store has not been read yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            Self::Unknown | Self::Anonymous => None,
        }
    }

    /// Whether the signed-in user carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.profile().is_some_and(|p| p.role.is_admin())
    }
}

/// Owns the in-memory credential and mirrors every change into the store.
#[derive(Debug)]
pub struct SessionManager<B> {
    store: TokenStore<B>,
    credential: Option<Credential>,
    state: SessionState,
    epoch: u64,
}

impl<B: StorageBackend> SessionManager<B> {
    /// Manager in the `Unknown` state; call [`Self::initialize`] next.
    #[must_use]
    pub fn new(store: TokenStore<B>) -> Self {
        Self { store, credential: None, state: SessionState::Unknown, epoch: 0 }
    }

    /// Build and initialize against the platform clock in one step.
    #[must_use]
    pub fn restore(store: TokenStore<B>) -> Self {
        let mut manager = Self::new(store);
        manager.initialize();
        manager
    }

    /// Resolve `Unknown` from the token store using the platform clock.
    pub fn initialize(&mut self) -> &SessionState {
        self.initialize_at(clock::now_unix_secs())
    }

    /// Resolve the state from the token store as of `now` (Unix seconds).
    ///
    /// Expired or undecodable credentials are cleared from the store and the
    /// session falls back to `Anonymous`.
    pub fn initialize_at(&mut self, now: i64) -> &SessionState {
        let Some((credential, profile)) = self.store.read() else {
            // A lone credential or profile entry is still a dead session.
            tracing::debug!("no stored session");
            self.discard_stored();
            return &self.state;
        };

        match credential.claims() {
            Ok(claims) if !claims.is_expired_at(now) => {
                tracing::info!(username = %profile.username, exp = claims.exp, "session restored");
                self.credential = Some(credential);
                self.transition(SessionState::Authenticated(profile));
            }
            Ok(claims) => {
                tracing::info!(username = %profile.username, exp = claims.exp, now, "stored credential expired");
                self.discard_stored();
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored credential is malformed");
                self.discard_stored();
            }
        }
        &self.state
    }

    /// Adopt a freshly issued credential.
    ///
    /// The credential is trusted as issued; no expiry check happens here.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the pair cannot be persisted; the
    /// in-memory state is left unchanged in that case.
    pub fn login(&mut self, credential: Credential, profile: UserProfile) -> Result<(), SessionError> {
        self.store.write(&credential, &profile)?;
        tracing::info!(username = %profile.username, role = %profile.role, "logged in");
        self.credential = Some(credential);
        self.transition(SessionState::Authenticated(profile));
        Ok(())
    }

    /// Forget the session in memory and in the store.
    ///
    /// The in-memory session is dropped even when the store cannot be
    /// cleared, so a storage fault can never keep a user signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the store could not be cleared.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let cleared = self.store.clear();
        if let Some(profile) = self.state.profile() {
            tracing::info!(username = %profile.username, "logged out");
        }
        self.set_anonymous();
        cleared.map_err(SessionError::from)
    }

    /// Replace the profile, keeping the credential.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no user is signed in
    /// (nothing is written), or [`SessionError::Storage`] if the store
    /// rejects the write (memory keeps the previous profile).
    pub fn update_profile(&mut self, profile: UserProfile) -> Result<(), SessionError> {
        let Some(credential) = self.credential.as_ref() else {
            return Err(SessionError::NotAuthenticated);
        };
        self.store.write(credential, &profile)?;
        tracing::debug!(username = %profile.username, "profile updated");
        self.transition(SessionState::Authenticated(profile));
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.profile()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// The token store this manager writes through.
    #[must_use]
    pub fn store(&self) -> &TokenStore<B> {
        &self.store
    }

    /// Counter bumped on every transition.
    ///
    /// Capture it before an async request and compare afterwards to detect
    /// that the session changed while the request was in flight.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether `epoch` is still the current one.
    #[must_use]
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    fn discard_stored(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stale session");
        }
        self.set_anonymous();
    }

    fn set_anonymous(&mut self) {
        self.credential = None;
        self.transition(SessionState::Anonymous);
    }

    fn transition(&mut self, next: SessionState) {
        self.state = next;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
