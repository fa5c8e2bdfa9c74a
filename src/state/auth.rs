//! Reactive auth snapshot for rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read this through an `RwSignal` to show who is signed in. The
//! session store stays the source of truth; pages refresh this after every
//! login, verify, or logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;
use crate::net::types::UserRecord;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self { user: session.is_authenticated().then(|| session.user.clone()), loading: false }
    }

    /// Name shown in the layout header.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(UserRecord::display_name)
            .unwrap_or_else(|| "guest".to_owned())
    }
}
