//! Navigation guard for authenticated-only routes.
//!
//! TRADE-OFFS
//! ==========
//! The check is presence-only: a stored `user` entry lets navigation through
//! even if the token behind it has expired. Pages that need a live session
//! call `SessionStore::verify` themselves.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{LOGIN_PATH, RouteDef};
use crate::storage::{DurableStorage, USER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Redirected { to: &'static str },
}

/// Decide whether `route` may be entered with the current stored session.
pub fn check(route: &RouteDef, storage: &impl DurableStorage) -> GuardDecision {
    if route.requires_auth && !storage.contains(USER_KEY) {
        log::info!("blocked {} without a stored user; redirecting to {LOGIN_PATH}", route.path);
        return GuardDecision::Redirected { to: LOGIN_PATH };
    }
    GuardDecision::Allowed
}
