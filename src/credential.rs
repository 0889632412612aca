//! Bearer credential and its embedded claims.
//!
//! DESIGN
//! ======
//! The client never holds the signing key, so decoding only splits the
//! `header.payload.signature` shape and reads the base64url payload. The
//! server remains the authority on signature validity; the client only uses
//! `exp` to drop stale sessions early and `role` for display hints.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Errors produced while decoding a credential's claims.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The token does not have three dot-separated segments.
    #[error("credential is not a three-segment token")]
    Shape,

    /// The payload segment is not valid base64url.
    #[error("credential payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload decoded but is not the expected JSON claims object.
    #[error("credential claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims read from a credential payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject; the backend puts the username here.
    #[serde(default)]
    pub sub: Option<String>,
    /// Role identifier, when the issuer embeds one.
    #[serde(default)]
    pub role: Option<Role>,
    /// Expiration in seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at in seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// Whether the credential has expired at `now` (seconds since epoch).
    ///
    /// A credential whose `exp` equals `now` is already expired.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Opaque bearer token issued by the backend.
///
/// Never mutated; a new login replaces it wholesale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the claims without verifying the signature.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] if the token is not a three-segment token
    /// with a base64url JSON payload carrying at least `exp`.
    pub fn claims(&self) -> Result<Claims, CredentialError> {
        let mut segments = self.0.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (segments.next(), segments.next(), segments.next(), segments.next())
        else {
            return Err(CredentialError::Shape);
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens end up in logs through `{:?}`; keep only a short prefix.
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "Credential({prefix}…)")
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}
