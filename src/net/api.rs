//! Typed wrappers for the practice API's CRUD endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Inputs that the server would refuse anyway are checked here first and
//! reported as `ApiError::Invalid`, so pages can show a precise message
//! without a round trip.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiRequest, HttpClient};
use super::types::{
    AnswerResult, AnswerSubmission, ErrorRecordPage, ExerciseSet, ExerciseSetAnswers, ExerciseSetCreated,
    ExerciseSetRequest, Expression, MessageResponse, MistakePracticeRequest, PracticeRecordPage,
    PracticeRecordRequest, RegisterRequest, UserProfile, UserUpdate,
};
use crate::error::ApiError;

pub const DEFAULT_RECORDS_PAGE_SIZE: u32 = 10;
pub const DEFAULT_MISTAKES_PAGE_SIZE: u32 = 20;
pub const MAX_OPERATOR_COUNT: i64 = 9;

const UNSAFE_USER_ID: &str = "User ID may not contain spaces or any of / ? # % \\";

/// `id` as a single URL path segment.
///
/// Ids that would change the path or query are refused rather than escaped.
///
/// # Errors
///
/// Returns `ApiError::Invalid` for empty ids and ids with whitespace, control
/// characters, or any of `/ ? # % \`.
pub fn path_segment(id: &str) -> Result<&str, ApiError> {
    let unsafe_char = |c: char| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '%' | '\\');
    if id.is_empty() || id.chars().any(unsafe_char) {
        return Err(ApiError::Invalid(UNSAFE_USER_ID));
    }
    Ok(id)
}

fn user_endpoint(user_id: &str) -> Result<String, ApiError> {
    Ok(format!("/api/user/{}", path_segment(user_id)?))
}

fn user_statistics_endpoint(user_id: &str) -> Result<String, ApiError> {
    Ok(format!("/api/user/{}/statistics", path_segment(user_id)?))
}

fn exercise_set_endpoint(set_id: i64) -> String {
    format!("/api/exercise-set/{set_id}")
}

fn expressions_endpoint(set_id: i64) -> String {
    format!("/api/exercise-set/{set_id}/expressions")
}

fn answers_endpoint(set_id: i64) -> String {
    format!("/api/exercise-set/{set_id}/answers")
}

fn error_records_endpoint(user_id: &str) -> Result<String, ApiError> {
    Ok(format!("/api/error-records/{}", path_segment(user_id)?))
}

fn error_record_endpoint(error_id: i64) -> String {
    format!("/api/error-records/{error_id}")
}

/// Filters for the mistakes list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecordQuery {
    pub page: u32,
    pub per_page: u32,
    pub show_exported: bool,
    pub search: String,
    /// `YYYY-MM-DD`; only applied together with `end_date`.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for ErrorRecordQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_MISTAKES_PAGE_SIZE,
            show_exported: false,
            search: String::new(),
            start_date: None,
            end_date: None,
        }
    }
}

impl ErrorRecordQuery {
    /// Query pairs with empty filters omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("per_page", self.per_page.max(1).to_string()),
            ("show_exported", self.show_exported.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_owned()));
        }
        if let (Some(start), Some(end)) = (self.start_date.as_deref(), self.end_date.as_deref()) {
            pairs.push(("start_date", start.to_owned()));
            pairs.push(("end_date", end.to_owned()));
        }
        pairs
    }
}

fn practice_records_query(user_id: &str, page: u32, size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.max(1).to_string()),
        ("size", size.max(1).to_string()),
        ("user_id", user_id.to_owned()),
    ]
}

/// Reject registrations the server would refuse for missing fields.
///
/// # Errors
///
/// Returns `ApiError::Invalid` naming the first problem found.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    if req.user_id.trim().is_empty() {
        return Err(ApiError::Invalid("Enter a user ID."));
    }
    path_segment(&req.user_id)?;
    if req.name.trim().is_empty() {
        return Err(ApiError::Invalid("Enter a name."));
    }
    if req.id_card.trim().is_empty() {
        return Err(ApiError::Invalid("Enter an ID card number."));
    }
    if req.grade <= 0 {
        return Err(ApiError::Invalid("Grade must be a positive number."));
    }
    if req.password.is_empty() {
        return Err(ApiError::Invalid("Enter a password."));
    }
    Ok(())
}

/// Check exercise-set parameters against the server's constraints.
///
/// # Errors
///
/// Returns `ApiError::Invalid` naming the first violated constraint.
pub fn validate_exercise_set(req: &ExerciseSetRequest) -> Result<(), ApiError> {
    if req.total_expressions <= 0 {
        return Err(ApiError::Invalid("Question count must be greater than zero."));
    }
    if req.bracket_expressions < 0 || req.bracket_expressions > req.total_expressions {
        return Err(ApiError::Invalid("Bracket questions must be between zero and the question count."));
    }
    if req.time_limit <= 0 {
        return Err(ApiError::Invalid("Time limit must be greater than zero."));
    }
    if req.operators.is_empty() {
        return Err(ApiError::Invalid("Select at least one operator."));
    }
    if !(1..=MAX_OPERATOR_COUNT).contains(&req.operator_count) {
        return Err(ApiError::Invalid("Operators per question must be between 1 and 9."));
    }
    if req.min_number > req.max_number {
        return Err(ApiError::Invalid("Minimum number must not exceed the maximum."));
    }
    Ok(())
}

/// Create an account via `POST /api/user`.
///
/// # Errors
///
/// Returns `ApiError::Invalid` for incomplete input, or the transport error.
pub async fn register(client: &HttpClient, req: &RegisterRequest) -> Result<MessageResponse, ApiError> {
    validate_registration(req)?;
    client.execute(ApiRequest::post("/api/user").json(req)?).await
}

/// Fetch a user's profile via `GET /api/user/{id}`.
///
/// # Errors
///
/// Returns the transport error; a missing user is `Rejected { status: 404 }`.
/// An id unusable as a path segment is `ApiError::Invalid`.
pub async fn fetch_user(client: &HttpClient, user_id: &str) -> Result<UserProfile, ApiError> {
    client.execute(ApiRequest::get(user_endpoint(user_id)?)).await
}

/// Update profile fields via `PUT /api/user/{id}`.
///
/// # Errors
///
/// Returns `ApiError::Invalid` when nothing would change.
pub async fn update_user(client: &HttpClient, user_id: &str, update: &UserUpdate) -> Result<MessageResponse, ApiError> {
    if update.is_empty() {
        return Err(ApiError::Invalid("Nothing to update."));
    }
    client.execute(ApiRequest::put(user_endpoint(user_id)?).json(update)?).await
}

/// Generate a new exercise set via `POST /api/exercise-set`.
///
/// # Errors
///
/// Returns `ApiError::Invalid` for out-of-range parameters.
pub async fn create_exercise_set(client: &HttpClient, req: &ExerciseSetRequest) -> Result<ExerciseSetCreated, ApiError> {
    validate_exercise_set(req)?;
    client.execute(ApiRequest::post("/api/exercise-set").json(req)?).await
}

/// # Errors
///
/// Returns the transport error.
pub async fn fetch_exercise_set(client: &HttpClient, set_id: i64) -> Result<ExerciseSet, ApiError> {
    client.execute(ApiRequest::get(exercise_set_endpoint(set_id))).await
}

/// # Errors
///
/// Returns the transport error.
pub async fn fetch_expressions(client: &HttpClient, set_id: i64) -> Result<Vec<Expression>, ApiError> {
    client.execute(ApiRequest::get(expressions_endpoint(set_id))).await
}

/// Fetch the per-expression review of a finished set.
///
/// # Errors
///
/// Returns the transport error.
pub async fn fetch_exercise_set_answers(client: &HttpClient, set_id: i64) -> Result<ExerciseSetAnswers, ApiError> {
    client.execute(ApiRequest::get(answers_endpoint(set_id))).await
}

/// Record one answer via `POST /api/answer-record`.
///
/// # Errors
///
/// Returns the transport error.
pub async fn submit_answer(client: &HttpClient, submission: &AnswerSubmission) -> Result<AnswerResult, ApiError> {
    client.execute(ApiRequest::post("/api/answer-record").json(submission)?).await
}

/// # Errors
///
/// Returns the transport error.
pub async fn create_practice_record(client: &HttpClient, req: &PracticeRecordRequest) -> Result<MessageResponse, ApiError> {
    client.execute(ApiRequest::post("/api/practice-record").json(req)?).await
}

/// Page through a user's practice history, newest first.
///
/// # Errors
///
/// Returns the transport error.
pub async fn fetch_practice_records(
    client: &HttpClient,
    user_id: &str,
    page: u32,
    size: u32,
) -> Result<PracticeRecordPage, ApiError> {
    let request = ApiRequest::get("/api/practice-records").query(practice_records_query(user_id, page, size));
    client.execute(request).await
}

/// # Errors
///
/// Returns the transport error.
pub async fn fetch_error_records(
    client: &HttpClient,
    user_id: &str,
    query: &ErrorRecordQuery,
) -> Result<ErrorRecordPage, ApiError> {
    let request = ApiRequest::get(error_records_endpoint(user_id)?).query(query.to_pairs());
    client.execute(request).await
}

/// # Errors
///
/// Returns the transport error.
pub async fn delete_error_record(client: &HttpClient, error_id: i64) -> Result<MessageResponse, ApiError> {
    client.execute(ApiRequest::delete(error_record_endpoint(error_id))).await
}

/// Build a fresh exercise set from selected mistakes.
///
/// # Errors
///
/// Returns `ApiError::Invalid` when no mistakes are selected.
pub async fn practice_from_mistakes(
    client: &HttpClient,
    user_id: &str,
    mistake_ids: &[i64],
) -> Result<ExerciseSetCreated, ApiError> {
    if mistake_ids.is_empty() {
        return Err(ApiError::Invalid("Select at least one mistake."));
    }
    let body = MistakePracticeRequest { user_id: user_id.to_owned(), mistake_ids: mistake_ids.to_vec() };
    client
        .execute(ApiRequest::post("/api/practice-from-mistakes").json(&body)?)
        .await
}

/// Aggregate statistics for the profile and home pages; shape is server-defined.
///
/// # Errors
///
/// Returns the transport error.
pub async fn fetch_statistics(client: &HttpClient, user_id: &str) -> Result<serde_json::Value, ApiError> {
    client.execute(ApiRequest::get(user_statistics_endpoint(user_id)?)).await
}
