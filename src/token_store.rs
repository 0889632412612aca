//! Persisted credential + profile pair.
//!
//! The store performs no validation; expiry and decoding belong to the
//! session manager. Its only invariants are that both entries are written
//! together and cleared together.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::Arc;

use crate::credential::Credential;
use crate::storage::{StorageBackend, StorageError};
use crate::types::UserProfile;

/// Storage key for the raw bearer token.
pub const CREDENTIAL_KEY: &str = "credential";
/// Storage key for the JSON-serialized [`UserProfile`].
pub const PROFILE_KEY: &str = "user-profile";

/// Token store over a shared storage backend.
///
/// Cloning is cheap and every clone sees the same backend, which is how the
/// API client observes logins and logouts made through the session manager.
#[derive(Debug)]
pub struct TokenStore<B> {
    backend: Arc<B>,
}

impl<B> Clone for TokenStore<B> {
    fn clone(&self) -> Self {
        Self { backend: Arc::clone(&self.backend) }
    }
}

impl<B: StorageBackend> TokenStore<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend: Arc::new(backend) }
    }

    #[must_use]
    pub fn from_shared(backend: Arc<B>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist `credential` and `profile` as a single batch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the profile cannot be serialized or the
    /// backend rejects the write.
    pub fn write(&self, credential: &Credential, profile: &UserProfile) -> Result<(), StorageError> {
        let profile_json = serde_json::to_string(profile)?;
        self.backend
            .set_entries(&[(CREDENTIAL_KEY, credential.as_str()), (PROFILE_KEY, &profile_json)])
    }

    /// Both entries, if both are present and the profile parses.
    ///
    /// Backend failures read as absent; the caller treats that as logged-out.
    #[must_use]
    pub fn read(&self) -> Option<(Credential, UserProfile)> {
        let credential = self.credential()?;
        let raw_profile = match self.backend.get(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "token store profile read failed");
                return None;
            }
        };
        match serde_json::from_str::<UserProfile>(&raw_profile) {
            Ok(profile) => Some((credential, profile)),
            Err(e) => {
                tracing::warn!(error = %e, "stored user profile is not valid JSON");
                None
            }
        }
    }

    /// Just the credential; this is what the API client attaches.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        match self.backend.get(CREDENTIAL_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(Credential::from),
            Err(e) => {
                tracing::warn!(error = %e, "token store credential read failed");
                None
            }
        }
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove_entries(&[CREDENTIAL_KEY, PROFILE_KEY])
    }
}
