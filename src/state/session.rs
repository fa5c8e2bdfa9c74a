//! Session store: the single owner of "who is signed in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `login`/`verify`/`logout`; the route guard reads the same durable
//! storage this store writes. Nothing else mutates the session.
//!
//! ARCHITECTURE
//! ============
//! Memory and storage are updated together under one lock, and the lock is
//! never held across an `.await`. Each operation does its network call first
//! and then applies the outcome in a single step.
//!
//! CONCURRENCY
//! ===========
//! Overlapping logins are last-write-wins in completion order. A verify
//! outcome is only applied while the token it checked is still the held
//! token; a result for a token that has since been replaced or cleared is
//! dropped and reported as `false`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::ApiError;
use crate::net::gateway::AuthGateway;
use crate::net::types::{Credentials, UserRecord};
use crate::storage::{DurableStorage, TOKEN_KEY, USER_KEY};

/// Token plus user. An empty token means signed out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Rebuild the session persisted by a previous page load.
    fn load(storage: &impl DurableStorage) -> Self {
        let token = storage.get(TOKEN_KEY).unwrap_or_default();
        let user = match storage.get(USER_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable stored user: {e}");
                UserRecord::default()
            }),
            None => UserRecord::default(),
        };
        Self { token, user }
    }
}

pub struct SessionStore<G, S> {
    gateway: G,
    storage: S,
    session: Mutex<Session>,
}

impl<G, S> SessionStore<G, S>
where
    G: AuthGateway,
    S: DurableStorage,
{
    /// Create a store seeded from `storage`.
    pub fn new(gateway: G, storage: S) -> Self {
        let session = Session::load(&storage);
        Self { gateway, storage, session: Mutex::new(session) }
    }

    pub fn token(&self) -> String {
        self.lock().token.clone()
    }

    pub fn user(&self) -> UserRecord {
        self.lock().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Sign in and persist the returned token and user.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged, or `ApiError::Malformed` when the
    /// server answers 2xx with an empty token. The session is untouched on
    /// error.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Credentials { username: username.to_owned(), password: password.to_owned() };
        let resp = self.gateway.login(&credentials).await.inspect_err(|e| {
            log::warn!("login failed for {username}: {e}");
        })?;
        if resp.token.is_empty() {
            return Err(ApiError::Malformed("login response carried an empty token".to_owned()));
        }
        let user_json = serde_json::to_string(&resp.user).map_err(|e| ApiError::Malformed(e.to_string()))?;

        let mut session = self.lock();
        self.storage.set(TOKEN_KEY, &resp.token);
        self.storage.set(USER_KEY, &user_json);
        session.token = resp.token;
        session.user = resp.user;
        log::info!("signed in as {username}");
        Ok(())
    }

    /// Re-validate the held token.
    ///
    /// Returns `false` without a request when signed out. Any failure signs
    /// the session out.
    pub async fn verify(&self) -> bool {
        let token = self.token();
        if token.is_empty() {
            log::debug!("verify skipped: no token held");
            return false;
        }

        let outcome = self.gateway.verify(&token).await;

        let mut session = self.lock();
        if session.token != token {
            log::debug!("dropping verify result for a replaced token");
            return false;
        }
        match outcome.and_then(|resp| {
            let raw = serde_json::to_string(&resp.user).map_err(|e| ApiError::Malformed(e.to_string()))?;
            Ok((resp.user, raw))
        }) {
            Ok((user, raw)) => {
                self.storage.set(USER_KEY, &raw);
                session.user = user;
                true
            }
            Err(e) => {
                log::warn!("token verification failed, signing out: {e}");
                self.clear(&mut session);
                false
            }
        }
    }

    /// Sign out. Idempotent.
    pub fn logout(&self) {
        let mut session = self.lock();
        self.clear(&mut session);
        log::info!("signed out");
    }

    fn clear(&self, session: &mut Session) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        *session = Session::default();
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
