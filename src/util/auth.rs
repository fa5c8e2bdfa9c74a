//! Route-guard glue between the route table and `leptos_router`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app` wraps every authenticated route in a `ProtectedRoute` whose
//! condition comes from here. The router evaluates the condition before the
//! page component runs, so a refused page never builds its view or starts its
//! loaders.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::router::guard::{GuardDecision, check};
use crate::router::routes::{LOGIN_PATH, View, route_for};
use crate::storage::{DurableStorage, LocalStorage};

/// `ProtectedRoute` condition for `view` against `storage`.
///
/// Always `Some`: the decision is synchronous, so there is no pending state.
pub fn guard_condition(view: View, storage: &impl DurableStorage) -> Option<bool> {
    Some(check(route_for(view), storage) == GuardDecision::Allowed)
}

/// Condition closure that reads browser storage each time the route renders.
pub fn route_guard(view: View) -> impl Fn() -> Option<bool> + Send + Clone + 'static {
    move || guard_condition(view, &LocalStorage)
}

/// Where refused navigations land.
pub fn guard_redirect() -> &'static str {
    LOGIN_PATH
}
