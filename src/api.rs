//! REST gateway to the CityConnect backend.
//!
//! Every request goes through [`ApiClient::send`], which reads the token
//! store right before dispatch and attaches `Authorization: Bearer …` when a
//! credential is present. Without one the request goes out unauthenticated
//! and the backend decides.
//!
//! ERROR HANDLING
//! ==============
//! Callers get a single [`ApiError`] shape whose `message()` is what the UI
//! shows: the backend's `message` field when the error body has one, else the
//! caller-supplied fallback for that operation.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::storage::StorageBackend;
use crate::token_store::TokenStore;
use crate::types::ErrorBody;

/// Failure of a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (DNS, connect, CORS, ...).
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success response carried a body that does not match the expected type.
    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Human-readable message for notifications.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Transport { message, .. } | Self::Decode { message, .. } => {
                message
            }
        }
    }

    /// HTTP status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the backend rejected the credential (401/403).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Pick the message shown for a failed response body.
pub(crate) fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Join the base URL and an endpoint path with exactly one slash.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// HTTP client bound to a base URL and a token store.
#[derive(Debug)]
pub struct ApiClient<B> {
    http: reqwest::Client,
    base_url: String,
    store: TokenStore<B>,
}

impl<B> Clone for ApiClient<B> {
    fn clone(&self) -> Self {
        Self { http: self.http.clone(), base_url: self.base_url.clone(), store: self.store.clone() }
    }
}

impl<B: StorageBackend> ApiClient<B> {
    #[must_use]
    pub fn new(config: &ClientConfig, store: TokenStore<B>) -> Self {
        Self::with_http(reqwest::Client::new(), config, store)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom roots, ...).
    #[must_use]
    pub fn with_http(http: reqwest::Client, config: &ClientConfig, store: TokenStore<B>) -> Self {
        Self { http, base_url: config.api_url.trim_end_matches('/').to_owned(), store }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn store(&self) -> &TokenStore<B> {
        &self.store
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None, fallback).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<Q, T>(&self, path: &str, body: &Q, fallback: &str) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), fallback).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put<Q, T>(&self, path: &str, body: &Q, fallback: &str) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body), fallback).await
    }

    /// `DELETE path`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str, fallback: &str) -> Result<(), ApiError> {
        self.send::<(), serde_json::Value>(Method::DELETE, path, None, fallback).await?;
        Ok(())
    }

    /// Dispatch one request and decode the JSON response.
    ///
    /// An empty success body decodes as JSON `null`, so `T = ()` or
    /// `Option<_>` accept `204 No Content`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when no response arrives.
    /// - [`ApiError::Status`] on non-2xx, with the backend message or `fallback`.
    /// - [`ApiError::Decode`] when a 2xx body does not match `T`.
    pub async fn send<Q, T>(&self, method: Method, path: &str, body: Option<&Q>, fallback: &str) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, path);
        let mut request = self.http.request(method.clone(), &url).header(ACCEPT, "application/json");
        if let Some(credential) = self.store.credential() {
            request = request.header(AUTHORIZATION, credential.bearer());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |source: reqwest::Error| ApiError::Transport { message: fallback.to_owned(), source };
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            transport(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            let message = error_message(&bytes, fallback);
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "backend rejected request");
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        tracing::debug!(%method, %url, status = status.as_u16(), bytes = bytes.len(), "request ok");

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { &bytes };
        serde_json::from_slice(raw).map_err(|source| ApiError::Decode { message: fallback.to_owned(), source })
    }
}
