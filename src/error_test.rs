use super::*;

#[test]
fn rejected_reads_server_error_message() {
    let err = ApiError::rejected(401, r#"{"error":"wrong password"}"#);
    assert_eq!(err, ApiError::Rejected { status: 401, message: Some("wrong password".to_owned()) });
    assert_eq!(err.user_message(), "wrong password");
}

#[test]
fn rejected_without_error_body_falls_back_to_generic_message() {
    let err = ApiError::rejected(500, "<html>oops</html>");
    assert_eq!(err, ApiError::Rejected { status: 500, message: None });
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn rejected_with_blank_error_is_treated_as_missing() {
    let err = ApiError::rejected(400, r#"{"error":"  "}"#);
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn network_and_malformed_use_generic_message() {
    assert_eq!(ApiError::Network("offline".into()).user_message(), GENERIC_FAILURE_MESSAGE);
    assert_eq!(ApiError::Malformed("missing token".into()).user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn invalid_input_message_is_shown_verbatim() {
    assert_eq!(ApiError::Invalid("Enter a username.").user_message(), "Enter a username.");
}

#[test]
fn auth_rejection_covers_401_and_403_only() {
    assert!(ApiError::Rejected { status: 401, message: None }.is_auth_rejection());
    assert!(ApiError::Rejected { status: 403, message: None }.is_auth_rejection());
    assert!(!ApiError::Rejected { status: 500, message: None }.is_auth_rejection());
    assert!(!ApiError::Network("x".into()).is_auth_rejection());
}

#[test]
fn display_includes_status() {
    let err = ApiError::Rejected { status: 404, message: None };
    assert_eq!(err.to_string(), "request rejected with status 404");
}
