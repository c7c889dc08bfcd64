//! Loosely-typed request payloads and their validation.
//!
//! Every field is optional so that a payload can be deserialized as-is;
//! [`Tracker`](super::Tracker) operations check presence and parse enum and
//! date strings before anything reaches the store.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::records::DATE_FORMAT;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHabit {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHabit {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogHabit {
    pub habit_id: Option<i64>,
    pub status: Option<String>,
    /// `YYYY-MM-DD`; defaults to the caller's today.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskStatus {
    pub id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFocusSession {
    pub duration_minutes: Option<u32>,
    pub goal: Option<String>,
    pub achieved: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestion {
    pub title: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestion {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePrinciple {
    pub question_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub examples: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrinciple {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub examples: Option<String>,
    pub status: Option<String>,
}

/// Question list filter: exact category and case-insensitive title search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// The value if it has non-whitespace content.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| ValidationError::invalid("date", format!("'{raw}' is not YYYY-MM-DD: {e}")))
}
