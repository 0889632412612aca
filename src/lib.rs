//! # cityconnect
//!
//! Client core for the CityConnect citizen issue-reporting service.
//!
//! This crate owns the session model shared by the browser client (`client/`)
//! and the command-line front-end (`cli/`): credential decoding, the
//! persisted token store, the session state machine, route guards, the REST
//! gateway, and the typed domain services layered over it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager initializes from the token store at start, guards
//! consult it on every navigation, and the API client reads the token store
//! on every outbound request. Nothing here renders UI.

pub mod api;
pub mod clock;
pub mod config;
pub mod credential;
pub mod guard;
pub mod notify;
pub mod services;
pub mod session;
pub mod storage;
pub mod token_store;
pub mod types;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use credential::{Claims, Credential, CredentialError};
pub use guard::{GuardOutcome, Route, RoutePolicy};
pub use session::{SessionError, SessionManager, SessionState};
pub use storage::{MemoryStorage, StorageBackend, StorageError};
pub use token_store::TokenStore;
pub use types::{Role, UserProfile};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
