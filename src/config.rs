//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const API_URL_ENV: &str = "CITYCONNECT_API_URL";

/// Suffix the backend mounts its REST API under.
const API_PREFIX: &str = "/api/v1";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API URL is not an absolute http(s) URL.
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, without trailing slash.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned() }
    }
}

impl ClientConfig {
    /// Validate and normalize an explicit API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `api_url` does not parse as
    /// an absolute `http`/`https` URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let trimmed = api_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| ConfigError::InvalidApiUrl { url: api_url.to_owned(), reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: api_url.to_owned(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self { api_url: trimmed.to_owned() })
    }

    /// Build config from the environment.
    ///
    /// Optional:
    /// - `CITYCONNECT_API_URL`: default `http://localhost:8080/api/v1`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Ok(Self::default()),
        }
    }

    /// Backend origin, i.e. the API URL without its `/api/v1` suffix.
    #[must_use]
    pub fn backend_origin(&self) -> &str {
        self.api_url.strip_suffix(API_PREFIX).unwrap_or(&self.api_url)
    }

    /// Absolute URL for a backend-relative asset path such as an issue image.
    #[must_use]
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.backend_origin(), path.trim_start_matches('/'))
    }
}
