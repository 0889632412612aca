use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::storage::{FileStorage, MemoryStorage};
use crate::token_store::{CREDENTIAL_KEY, PROFILE_KEY};
use crate::types::Role;

const NOW: i64 = 1_700_000_000;
const HOUR: i64 = 3600;

fn jwt(exp: i64, role: &str) -> Credential {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"alice","role":"{role}","exp":{exp}}}"#));
    Credential::new(format!("{header}.{payload}.sig"))
}

fn alice(role: Role) -> UserProfile {
    UserProfile::new("alice", role)
}

fn seeded(credential: &Credential, profile: &UserProfile) -> TokenStore<MemoryStorage> {
    let store = TokenStore::new(MemoryStorage::new());
    store.write(credential, profile).unwrap();
    store
}

// =============================================================
// initialization
// =============================================================

#[test]
fn new_manager_starts_unknown() {
    let manager = SessionManager::new(TokenStore::new(MemoryStorage::new()));
    assert_eq!(manager.state(), &SessionState::Unknown);
    assert!(!manager.is_authenticated());
}

#[test]
fn initialize_empty_store_is_anonymous() {
    let mut manager = SessionManager::new(TokenStore::new(MemoryStorage::new()));
    assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous);
}

#[test]
fn initialize_valid_credential_is_authenticated() {
    let cred = jwt(NOW + HOUR, "ROLE_CITIZEN");
    let mut manager = SessionManager::new(seeded(&cred, &alice(Role::Regular)));
    assert_eq!(manager.initialize_at(NOW), &SessionState::Authenticated(alice(Role::Regular)));
    assert_eq!(manager.credential(), Some(&cred));
}

#[test]
fn initialize_expired_credential_clears_store() {
    let store = seeded(&jwt(NOW - HOUR, "ROLE_ADMIN"), &alice(Role::Admin));
    let mut manager = SessionManager::new(store.clone());
    assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous);
    assert!(store.read().is_none());
    assert!(store.backend().is_empty());
    assert!(manager.credential().is_none());
}

#[test]
fn initialize_credential_expiring_now_is_expired() {
    let store = seeded(&jwt(NOW, "ROLE_CITIZEN"), &alice(Role::Regular));
    let mut manager = SessionManager::new(store.clone());
    assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous);
    assert!(store.read().is_none());
}

#[test]
fn initialize_malformed_credentials_fall_back_to_anonymous() {
    for raw in ["", "tok123", "a.b", "a.b.c.d", "x.%%%.y", "x.bm90IGpzb24.y"] {
        let store = TokenStore::new(MemoryStorage::new());
        store
            .backend()
            .set_entries(&[
                (crate::token_store::CREDENTIAL_KEY, raw),
                (crate::token_store::PROFILE_KEY, r#"{"username":"alice","role":"ROLE_ADMIN"}"#),
            ])
            .unwrap();
        let mut manager = SessionManager::new(store.clone());
        assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous, "credential {raw:?}");
        assert!(store.backend().is_empty(), "credential {raw:?} left state behind");
    }
}

#[test]
fn initialize_profile_without_credential_is_anonymous() {
    let store = TokenStore::new(MemoryStorage::new());
    store
        .backend()
        .set(crate::token_store::PROFILE_KEY, r#"{"username":"alice","role":"ROLE_ADMIN"}"#)
        .unwrap();
    let mut manager = SessionManager::new(store.clone());
    assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous);
    assert!(!manager.state().is_admin());
    assert!(store.backend().is_empty());
}

// =============================================================
// login / logout
// =============================================================

#[test]
fn login_persists_exact_pair() {
    let store = TokenStore::new(MemoryStorage::new());
    let mut manager = SessionManager::new(store.clone());
    manager.initialize_at(NOW);

    manager.login(Credential::new("tok123"), alice(Role::Admin)).unwrap();

    assert_eq!(store.read(), Some((Credential::new("tok123"), alice(Role::Admin))));
    assert_eq!(manager.state(), &SessionState::Authenticated(alice(Role::Admin)));
}

#[test]
fn login_trusts_credential_without_decoding() {
    let mut manager = SessionManager::new(TokenStore::new(MemoryStorage::new()));
    manager.login(Credential::new("tok123"), alice(Role::Admin)).unwrap();
    assert!(manager.is_authenticated());
    assert!(manager.state().is_admin());
}

#[test]
fn relogin_replaces_pair_wholesale() {
    let store = TokenStore::new(MemoryStorage::new());
    let mut manager = SessionManager::new(store.clone());
    manager.login(Credential::new("first"), alice(Role::Regular)).unwrap();
    let bob = UserProfile::new("bob", Role::Admin);
    manager.login(Credential::new("second"), bob.clone()).unwrap();
    assert_eq!(store.read(), Some((Credential::new("second"), bob)));
}

#[test]
fn logout_clears_store_and_reinit_is_anonymous() {
    let store = TokenStore::new(MemoryStorage::new());
    let mut manager = SessionManager::new(store.clone());
    manager.login(jwt(NOW + HOUR, "ROLE_CITIZEN"), alice(Role::Regular)).unwrap();

    manager.logout().unwrap();
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(store.read().is_none());

    let mut fresh = SessionManager::new(store);
    assert_eq!(fresh.initialize_at(NOW), &SessionState::Anonymous);
}

#[test]
fn login_survives_restart() {
    let store = TokenStore::new(MemoryStorage::new());
    let cred = jwt(NOW + HOUR, "ROLE_ADMIN");
    SessionManager::new(store.clone()).login(cred.clone(), alice(Role::Admin)).unwrap();

    let mut restarted = SessionManager::new(store);
    assert_eq!(restarted.initialize_at(NOW), &SessionState::Authenticated(alice(Role::Admin)));
    assert_eq!(restarted.credential(), Some(&cred));
}

// =============================================================
// update_profile
// =============================================================

#[test]
fn update_profile_keeps_credential() {
    let store = TokenStore::new(MemoryStorage::new());
    let mut manager = SessionManager::new(store.clone());
    let cred = jwt(NOW + HOUR, "ROLE_CITIZEN");
    manager.login(cred.clone(), alice(Role::Regular)).unwrap();

    let updated = alice(Role::Regular).with_email("new@example.com");
    manager.update_profile(updated.clone()).unwrap();

    assert_eq!(manager.credential(), Some(&cred));
    assert_eq!(manager.profile(), Some(&updated));
    assert_eq!(store.read(), Some((cred, updated)));
}

#[test]
fn update_profile_while_anonymous_is_rejected_without_writing() {
    let store = TokenStore::new(MemoryStorage::new());
    let mut manager = SessionManager::new(store.clone());
    manager.initialize_at(NOW);

    let err = manager.update_profile(alice(Role::Admin)).unwrap_err();
    assert!(matches!(err, SessionError::NotAuthenticated));
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(store.backend().is_empty());
}

/// Memory storage that rejects writes to `refused` while `full` is set.
#[derive(Default)]
struct QuotaStorage {
    inner: MemoryStorage,
    refused: &'static str,
    full: AtomicBool,
}

impl StorageBackend for QuotaStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.refused && self.full.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_profile_write_keeps_stored_credential() {
    let store = TokenStore::new(QuotaStorage { refused: PROFILE_KEY, ..QuotaStorage::default() });
    let mut manager = SessionManager::new(store.clone());
    let cred = jwt(NOW + HOUR, "ROLE_CITIZEN");
    manager.login(cred.clone(), alice(Role::Regular)).unwrap();

    store.backend().full.store(true, Ordering::SeqCst);
    let err = manager.update_profile(alice(Role::Regular).with_email("new@example.com")).unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::Unavailable(_))));

    assert_eq!(manager.profile(), Some(&alice(Role::Regular)));
    assert_eq!(store.credential(), Some(cred.clone()));
    assert_eq!(store.read(), Some((cred, alice(Role::Regular))));
}

#[test]
fn failed_relogin_restores_previous_credential() {
    let store = TokenStore::new(QuotaStorage { refused: PROFILE_KEY, ..QuotaStorage::default() });
    let mut manager = SessionManager::new(store.clone());
    let first = jwt(NOW + HOUR, "ROLE_CITIZEN");
    manager.login(first.clone(), alice(Role::Regular)).unwrap();

    store.backend().full.store(true, Ordering::SeqCst);
    let second = jwt(NOW + 2 * HOUR, "ROLE_ADMIN");
    assert!(manager.login(second, alice(Role::Admin)).is_err());

    assert_eq!(manager.credential(), Some(&first));
    assert_eq!(store.read(), Some((first, alice(Role::Regular))));
}

#[test]
fn failed_first_login_leaves_nothing_stored() {
    let store = TokenStore::new(QuotaStorage { refused: PROFILE_KEY, ..QuotaStorage::default() });
    store.backend().full.store(true, Ordering::SeqCst);
    let mut manager = SessionManager::new(store.clone());
    manager.initialize_at(NOW);

    assert!(manager.login(jwt(NOW + HOUR, "ROLE_CITIZEN"), alice(Role::Regular)).is_err());
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert_eq!(store.backend().get(CREDENTIAL_KEY).unwrap(), None);
}

// =============================================================
// corrupt session file
// =============================================================

#[test]
fn corrupt_session_file_recovers_on_login_and_logout() {
    let path = std::env::temp_dir().join(format!("cityconnect-session-{}", uuid::Uuid::new_v4())).join("session.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{truncated").unwrap();

    let store = TokenStore::new(FileStorage::new(&path));
    let mut manager = SessionManager::new(store.clone());
    assert_eq!(manager.initialize_at(NOW), &SessionState::Anonymous);

    let cred = jwt(NOW + HOUR, "ROLE_ADMIN");
    manager.login(cred.clone(), alice(Role::Admin)).unwrap();
    assert_eq!(store.read(), Some((cred.clone(), alice(Role::Admin))));

    let mut reopened = SessionManager::new(TokenStore::new(FileStorage::new(&path)));
    assert_eq!(reopened.initialize_at(NOW), &SessionState::Authenticated(alice(Role::Admin)));

    manager.logout().unwrap();
    assert!(!path.exists());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

// =============================================================
// epoch
// =============================================================

#[test]
fn epoch_advances_on_every_transition() {
    let mut manager = SessionManager::new(TokenStore::new(MemoryStorage::new()));
    let start = manager.epoch();
    manager.initialize_at(NOW);
    let after_init = manager.epoch();
    assert!(after_init > start);

    manager.login(Credential::new("tok123"), alice(Role::Regular)).unwrap();
    assert!(!manager.is_current(after_init));

    let before_logout = manager.epoch();
    manager.logout().unwrap();
    assert!(!manager.is_current(before_logout));
}

// =============================================================
// scenarios
// =============================================================

#[test]
fn scenario_expired_one_hour_ago() {
    let store = seeded(&jwt(NOW - HOUR, "ROLE_CITIZEN"), &alice(Role::Regular));
    let manager = {
        let mut m = SessionManager::new(store.clone());
        m.initialize_at(NOW);
        m
    };
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(store.backend().is_empty());
}

#[test]
fn restore_uses_platform_clock() {
    let far_future = jwt(i64::from(u32::MAX) * 4, "ROLE_CITIZEN");
    let manager = SessionManager::restore(seeded(&far_future, &alice(Role::Regular)));
    assert!(manager.is_authenticated());

    let long_past = jwt(1, "ROLE_CITIZEN");
    let manager = SessionManager::restore(seeded(&long_past, &alice(Role::Regular)));
    assert_eq!(manager.state(), &SessionState::Anonymous);
}
