use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed focus session. Written once, when the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: i64,
    pub duration_minutes: u32,
    pub goal: String,
    pub achieved: bool,
    pub created_at: DateTime<Utc>,
}
