use super::*;

use std::collections::VecDeque;
use std::sync::Arc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use serde_json::json;

use crate::net::types::{LoginResponse, VerifyResponse};
use crate::storage::MemoryStorage;

// =============================================================
// Scripted gateway
// =============================================================

enum Reply<T> {
    Now(Result<T, ApiError>),
    Later(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, ApiError> {
        match self {
            Self::Now(result) => result,
            Self::Later(rx) => rx.await.unwrap_or_else(|_| Err(ApiError::Network("reply dropped".into()))),
        }
    }
}

#[derive(Default)]
struct MockGateway {
    logins: Mutex<VecDeque<Reply<LoginResponse>>>,
    verifies: Mutex<VecDeque<Reply<VerifyResponse>>>,
    login_calls: Mutex<Vec<String>>,
    verify_calls: Mutex<Vec<String>>,
}

impl MockGateway {
    fn with_login(self, reply: Reply<LoginResponse>) -> Self {
        self.logins.lock().unwrap().push_back(reply);
        self
    }

    fn with_verify(self, reply: Reply<VerifyResponse>) -> Self {
        self.verifies.lock().unwrap().push_back(reply);
        self
    }

    fn verify_calls(&self) -> Vec<String> {
        self.verify_calls.lock().unwrap().clone()
    }

    fn login_calls(&self) -> Vec<String> {
        self.login_calls.lock().unwrap().clone()
    }
}

impl AuthGateway for MockGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.login_calls.lock().unwrap().push(credentials.username.clone());
        let reply = self.logins.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(ApiError::Network("no scripted login".into())),
        }
    }

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        self.verify_calls.lock().unwrap().push(token.to_owned());
        let reply = self.verifies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(ApiError::Network("no scripted verify".into())),
        }
    }
}

fn user(value: serde_json::Value) -> UserRecord {
    serde_json::from_value(value).unwrap()
}

fn login_ok(token: &str, name: &str) -> Result<LoginResponse, ApiError> {
    Ok(LoginResponse { token: token.to_owned(), user: user(json!({"name": name})) })
}

fn rejected(status: u16) -> ApiError {
    ApiError::Rejected { status, message: Some("denied".into()) }
}

fn signed_in_storage() -> MemoryStorage {
    MemoryStorage::with_entries([(TOKEN_KEY, "T1"), (USER_KEY, r#"{"id":1,"name":"alice"}"#)])
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_store_is_signed_out_on_empty_storage() {
    let store = SessionStore::new(MockGateway::default(), MemoryStorage::new());
    assert_eq!(store.snapshot(), Session::default());
    assert!(!store.is_authenticated());
}

#[test]
fn new_store_restores_persisted_session() {
    let store = SessionStore::new(MockGateway::default(), signed_in_storage());
    assert_eq!(store.token(), "T1");
    assert_eq!(store.user(), user(json!({"id": 1, "name": "alice"})));
    assert!(store.is_authenticated());
}

#[test]
fn unreadable_stored_user_is_treated_as_empty() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "T1"), (USER_KEY, "{not json")]);
    let store = SessionStore::new(MockGateway::default(), storage);
    assert_eq!(store.token(), "T1");
    assert!(store.user().is_empty());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_sets_and_persists_token_and_user() {
    let storage = MemoryStorage::new();
    let gateway = MockGateway::default().with_login(Reply::Now(Ok(LoginResponse {
        token: "T1".into(),
        user: user(json!({"id": 1, "name": "alice"})),
    })));
    let store = SessionStore::new(gateway, storage.clone());

    block_on(store.login("alice", "secret")).unwrap();

    assert_eq!(store.token(), "T1");
    assert_eq!(store.user(), user(json!({"id": 1, "name": "alice"})));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"id":1,"name":"alice"}"#));

    store.logout();
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
}

#[test]
fn login_persists_user_in_server_key_order() {
    let storage = MemoryStorage::new();
    let gateway = MockGateway::default().with_login(Reply::Now(Ok(LoginResponse {
        token: "T1".into(),
        user: serde_json::from_str(r#"{"name":"bob","id":2,"grade":3}"#).unwrap(),
    })));
    let store = SessionStore::new(gateway, storage.clone());

    block_on(store.login("bob", "pw")).unwrap();

    assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"name":"bob","id":2,"grade":3}"#));
}

#[test]
fn login_sends_supplied_credentials() {
    let gateway = Arc::new(MockGateway::default().with_login(Reply::Now(login_ok("T1", "alice"))));
    let store = SessionStore::new(gateway.clone(), MemoryStorage::new());
    block_on(store.login("alice", "secret")).unwrap();
    assert_eq!(gateway.login_calls(), vec!["alice".to_owned()]);
}

#[test]
fn failed_login_propagates_error_and_keeps_state() {
    let storage = signed_in_storage();
    let gateway = MockGateway::default().with_login(Reply::Now(Err(rejected(401))));
    let store = SessionStore::new(gateway, storage.clone());

    let err = block_on(store.login("alice", "wrong")).unwrap_err();

    assert_eq!(err.user_message(), "denied");
    assert_eq!(store.token(), "T1");
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"id":1,"name":"alice"}"#));
}

#[test]
fn failed_login_when_signed_out_writes_nothing() {
    let storage = MemoryStorage::new();
    let gateway = MockGateway::default().with_login(Reply::Now(Err(ApiError::Network("offline".into()))));
    let store = SessionStore::new(gateway, storage.clone());

    assert!(block_on(store.login("alice", "pw")).is_err());
    assert!(storage.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn login_with_empty_token_is_malformed() {
    let storage = MemoryStorage::new();
    let gateway = MockGateway::default().with_login(Reply::Now(login_ok("", "alice")));
    let store = SessionStore::new(gateway, storage.clone());

    let err = block_on(store.login("alice", "pw")).unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
    assert!(storage.is_empty());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_memory_and_storage() {
    let storage = signed_in_storage();
    let store = SessionStore::new(MockGateway::default(), storage.clone());

    store.logout();

    assert_eq!(store.snapshot(), Session::default());
    assert!(storage.is_empty());
}

#[test]
fn logout_is_idempotent() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(MockGateway::default(), storage.clone());
    store.logout();
    store.logout();
    assert!(storage.is_empty());
    assert!(!store.is_authenticated());
}

// =============================================================
// verify
// =============================================================

#[test]
fn verify_without_token_skips_network() {
    let gateway = Arc::new(MockGateway::default());
    let store = SessionStore::new(gateway.clone(), MemoryStorage::new());

    assert!(!block_on(store.verify()));
    assert!(gateway.verify_calls().is_empty());
}

#[test]
fn verify_success_refreshes_user_and_keeps_token() {
    let storage = signed_in_storage();
    let gateway = Arc::new(
        MockGateway::default()
            .with_verify(Reply::Now(Ok(VerifyResponse { user: user(json!({"id": 1, "name": "Alice B."})) }))),
    );
    let store = SessionStore::new(gateway.clone(), storage.clone());

    assert!(block_on(store.verify()));

    assert_eq!(gateway.verify_calls(), vec!["T1".to_owned()]);
    assert_eq!(store.token(), "T1");
    assert_eq!(store.user().display_name().as_deref(), Some("Alice B."));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"id":1,"name":"Alice B."}"#));
}

#[test]
fn verify_rejection_signs_out() {
    let storage = signed_in_storage();
    let gateway = MockGateway::default().with_verify(Reply::Now(Err(rejected(401))));
    let store = SessionStore::new(gateway, storage.clone());

    assert!(!block_on(store.verify()));

    assert_eq!(store.snapshot(), Session::default());
    assert!(storage.is_empty());
}

#[test]
fn verify_network_failure_also_signs_out() {
    let storage = signed_in_storage();
    let gateway = MockGateway::default().with_verify(Reply::Now(Err(ApiError::Network("offline".into()))));
    let store = SessionStore::new(gateway, storage.clone());

    assert!(!block_on(store.verify()));
    assert!(storage.is_empty());
}

// =============================================================
// Overlapping operations
// =============================================================

#[test]
fn overlapping_logins_last_completion_wins() {
    let storage = MemoryStorage::new();
    let (tx_alice, rx_alice) = oneshot::channel();
    let (tx_bob, rx_bob) = oneshot::channel();
    let gateway = MockGateway::default()
        .with_login(Reply::Later(rx_alice))
        .with_login(Reply::Later(rx_bob));
    let store = SessionStore::new(gateway, storage.clone());

    let mut alice = Box::pin(store.login("alice", "pw"));
    assert!(alice.as_mut().now_or_never().is_none());
    let mut bob = Box::pin(store.login("bob", "pw"));
    assert!(bob.as_mut().now_or_never().is_none());

    tx_bob.send(login_ok("TB", "bob")).unwrap();
    block_on(bob).unwrap();
    assert_eq!(store.token(), "TB");

    tx_alice.send(login_ok("TA", "alice")).unwrap();
    block_on(alice).unwrap();
    assert_eq!(store.token(), "TA");
    assert_eq!(store.user().display_name().as_deref(), Some("alice"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("TA"));
    assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"name":"alice"}"#));
}

#[test]
fn verify_success_after_logout_is_dropped() {
    let storage = signed_in_storage();
    let (tx, rx) = oneshot::channel();
    let gateway = MockGateway::default().with_verify(Reply::Later(rx));
    let store = SessionStore::new(gateway, storage.clone());

    let mut verify = Box::pin(store.verify());
    assert!(verify.as_mut().now_or_never().is_none());
    store.logout();

    tx.send(Ok(VerifyResponse { user: user(json!({"id": 1})) })).unwrap();
    assert!(!block_on(verify));
    assert!(store.user().is_empty());
    assert!(storage.is_empty());
}

#[test]
fn stale_verify_failure_keeps_newer_login() {
    let storage = signed_in_storage();
    let (tx, rx) = oneshot::channel();
    let gateway = MockGateway::default()
        .with_verify(Reply::Later(rx))
        .with_login(Reply::Now(login_ok("T2", "bob")));
    let store = SessionStore::new(gateway, storage.clone());

    let mut verify = Box::pin(store.verify());
    assert!(verify.as_mut().now_or_never().is_none());
    block_on(store.login("bob", "pw")).unwrap();

    tx.send(Err(rejected(401))).unwrap();
    assert!(!block_on(verify));
    assert_eq!(store.token(), "T2");
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T2"));
}
