//! Error taxonomy for calls to the practice API.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, server rejections, and off-contract bodies are kept
//! apart so callers can decide between showing the server's message, showing
//! a generic message, or silently resetting the session.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown when the server did not supply one.
pub const GENERIC_FAILURE_MESSAGE: &str = "Operation failed, please try again later";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Input refused before any request was sent.
    #[error("invalid input: {0}")]
    Invalid(&'static str),
}

impl ApiError {
    /// Build a rejection from a status and the raw response body.
    ///
    /// The body is expected to be `{"error": "..."}`; anything else leaves the
    /// message empty.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        Self::Rejected { status, message }
    }

    /// Text suitable for direct display to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message: Some(message), .. } => message.clone(),
            Self::Invalid(reason) => (*reason).to_owned(),
            _ => GENERIC_FAILURE_MESSAGE.to_owned(),
        }
    }

    /// Whether the server refused the credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Rejected { status: 401 | 403, .. })
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}
