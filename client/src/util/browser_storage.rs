//! `localStorage`-backed storage for the session token store.
//!
//! TRADE-OFFS
//! ==========
//! The backend holds no handle: `web_sys::Storage` is not `Send`, so each
//! call looks the storage object up again. Outside the browser every call
//! fails with [`StorageError::Unavailable`], which the session manager reads
//! as "no stored session". Batched writes use the trait's default
//! `set_entries`, which restores earlier keys if a later write fails.

#[cfg(test)]
#[path = "browser_storage_test.rs"]
mod browser_storage_test;

use cityconnect::{StorageBackend, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

#[cfg(feature = "csr")]
fn js_failure(op: &str, key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{op} {key}: {err:?}"))
}

#[cfg(feature = "csr")]
impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|e| js_failure("get", key, &e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(|e| js_failure("set", key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(|e| js_failure("remove", key, &e))
    }
}

#[cfg(not(feature = "csr"))]
impl StorageBackend for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(unavailable())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> StorageError {
    StorageError::Unavailable("localStorage requires a browser".to_owned())
}
