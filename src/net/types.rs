//! Wire DTOs for the practice API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's JSON exactly. Integer fields accept
//! integer-valued floats because the server serializes some counters through
//! float arithmetic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The signed-in user as returned by the auth endpoints.
///
/// Kept opaque: the record is stored and echoed with the server's key order,
/// and only a few well-known fields are read for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Map<String, Value>);

impl UserRecord {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Server-side identifier, read from `user_id` or `id`.
    pub fn user_id(&self) -> Option<String> {
        ["user_id", "id"].iter().find_map(|key| match self.0.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> Option<String> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| self.user_id())
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful `POST /auth/login` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

/// Successful `POST /auth/verify` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerifyResponse {
    pub user: UserRecord,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Users
// =============================================================================

/// Body of `POST /api/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub name: String,
    pub id_card: String,
    pub grade: i64,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `GET /api/user/{id}` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub grade: i64,
    pub id_card: String,
    pub phone: Option<String>,
}

/// Body of `PUT /api/user/{id}`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none() && self.phone.is_none() && self.password.is_none()
    }
}

// =============================================================================
// Exercise sets
// =============================================================================

/// Body of `POST /api/exercise-set`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExerciseSetRequest {
    pub user_id: String,
    pub total_expressions: i64,
    pub bracket_expressions: i64,
    /// Minutes.
    pub time_limit: i64,
    pub operators: Vec<String>,
    pub operator_count: i64,
    pub min_number: i64,
    pub max_number: i64,
}

/// `{ exercise_set_id }` returned when a set is created.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExerciseSetCreated {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub exercise_set_id: i64,
    #[serde(default)]
    pub message: String,
}

/// Exercise set parameters as stored by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub exercise_set_id: Option<i64>,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total_expressions: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub bracket_expressions: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub time_limit: i64,
    /// Comma-separated operator list, e.g. `"+,-"`.
    pub operators: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub operator_count: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub min_number: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub max_number: i64,
    pub create_time: Option<String>,
}

impl ExerciseSet {
    pub fn operator_list(&self) -> Vec<&str> {
        split_operators(&self.operators)
    }
}

/// One generated expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub expression_id: i64,
    pub expression_text: String,
    pub answer: f64,
    pub has_brackets: bool,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub operator_count: i64,
}

/// Body of `POST /api/answer-record`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerSubmission {
    pub expression_id: i64,
    pub user_answer: i64,
    /// Seconds spent on this expression.
    pub answer_time: f64,
    /// Seconds spent on the whole set so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

/// `POST /api/answer-record` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AnswerResult {
    pub is_correct: bool,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub correct_answer: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub user_answer: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub answer_record_id: i64,
    pub is_completed: bool,
}

/// Per-expression review row in `GET /api/exercise-set/{id}/answers`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnsweredExpression {
    pub expression_text: String,
    pub answer: f64,
    pub user_answer: Option<f64>,
    pub is_correct: bool,
    pub has_brackets: bool,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub operator_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AnswerStatistics {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub correct: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub incorrect: i64,
    /// Percentage string such as `"85.0%"`.
    pub accuracy: String,
}

/// `GET /api/exercise-set/{id}/answers` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExerciseSetAnswers {
    pub exercise_set: ExerciseSet,
    pub expressions: Vec<AnsweredExpression>,
    pub statistics: AnswerStatistics,
}

// =============================================================================
// Practice history
// =============================================================================

/// Body of `POST /api/practice-record`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PracticeRecordRequest {
    pub user_id: String,
    pub exercise_set_id: i64,
    /// Seconds.
    pub duration: i64,
    pub is_timeout: bool,
    pub total_expressions: i64,
    pub bracket_expressions: i64,
    pub time_limit: i64,
    pub operators: Vec<String>,
    pub operator_count: i64,
    pub min_number: i64,
    pub max_number: i64,
}

/// One row of `GET /api/practice-records`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PracticeRecord {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub exercise_set_id: i64,
    pub completion_time: String,
    /// Seconds; may be fractional when summed from per-answer times.
    pub duration: f64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total_expressions: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub bracket_expressions: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub time_limit: i64,
    pub operators: String,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub operator_count: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub min_number: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub max_number: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub correct_count: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total_count: i64,
    pub is_timeout: bool,
    /// Percentage string such as `"85.0"`.
    pub accuracy: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PracticeRecordPage {
    pub records: Vec<PracticeRecord>,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total: i64,
}

// =============================================================================
// Mistakes
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    Medium,
    Hard,
}

/// One row of `GET /api/error-records/{user_id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorRecord {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub expression: String,
    pub correct_answer: f64,
    pub user_answer: f64,
    pub answer_time: f64,
    pub completion_time: String,
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub error_count: i64,
    pub is_exported: bool,
    pub export_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorRecordPage {
    pub items: Vec<ErrorRecord>,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub total: i64,
    #[serde(default)]
    pub has_exported: bool,
}

/// Body of `POST /api/practice-from-mistakes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MistakePracticeRequest {
    pub user_id: String,
    pub mistake_ids: Vec<i64>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Split a server operator string (`"+,-"`) into its operators.
pub fn split_operators(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|op| !op.is_empty()).collect()
}

/// Parse an accuracy string like `"85.0"` or `"85.0%"` into a number.
pub fn parse_accuracy(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches('%').trim().parse().ok()
}

fn deserialize_opt_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => number_to_i64(&value).map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_to_i64(&value).map_err(D::Error::custom)
}

fn number_to_i64(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err("expected integer-compatible number")
        }
        _ => Err("expected number"),
    }
}
