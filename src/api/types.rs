//! Data types for the homework status API.
//!
//! The endpoint returns a JSON object with a `homeworks` array and an
//! optional `current_date` forward cursor. Records deserialize via `serde`;
//! only `id`, `homework_name` and `status` are required, the remaining
//! fields ride along for logging.

use serde::{Deserialize, Serialize};

/// One submission's review state as returned by the status API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    /// Record identifier; status changes are tracked per id.
    pub id: i64,
    /// Title of the submitted work, used in notification texts.
    pub homework_name: String,
    /// Raw review status identifier (see [`HomeworkStatus`](crate::verdict::HomeworkStatus)).
    pub status: String,
    /// Reviewer's free-text comment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_comment: Option<String>,
    /// When the record was last updated (API-formatted timestamp string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
    /// Lesson the submission belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_name: Option<String>,
}

/// A validated API response: the ordered records plus the forward cursor
/// to pass as `from_date` on the next poll.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedResponse {
    pub homeworks: Vec<Homework>,
    /// Canonical cursor field (`current_date`). `None` means "cursor
    /// unchanged", never an error.
    pub current_date: Option<i64>,
}
