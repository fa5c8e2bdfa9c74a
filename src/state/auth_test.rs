use super::*;
use serde_json::json;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.display_name(), "guest");
}

// =============================================================
// from_session
// =============================================================

#[test]
fn from_signed_out_session_has_no_user() {
    let state = AuthState::from_session(&Session::default());
    assert!(state.user.is_none());
}

#[test]
fn from_signed_in_session_copies_user() {
    let session = Session {
        token: "T1".to_owned(),
        user: serde_json::from_value(json!({"user_id": "s001", "name": "Alice"})).unwrap(),
    };
    let state = AuthState::from_session(&session);
    assert_eq!(state.display_name(), "Alice");
    assert!(!state.loading);
}

#[test]
fn user_without_token_is_not_shown() {
    let session = Session { token: String::new(), user: serde_json::from_value(json!({"name": "stale"})).unwrap() };
    assert!(AuthState::from_session(&session).user.is_none());
}
