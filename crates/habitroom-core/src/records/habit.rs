use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Storage and wire format of a log's calendar day.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Polarity of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    /// A behavior to build
    Good,
    /// A behavior to avoid
    Bad,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Good => "good",
            HabitType::Bad => "bad",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(HabitType::Good),
            "bad" => Ok(HabitType::Bad),
            other => Err(ValidationError::invalid(
                "type",
                format!("expected 'good' or 'bad', got '{other}'"),
            )),
        }
    }
}

/// Outcome recorded for a habit on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Completed,
    Failed,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Completed => "completed",
            LogStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(LogStatus::Completed),
            "failed" => Ok(LogStatus::Failed),
            other => Err(ValidationError::invalid(
                "status",
                format!("expected 'completed' or 'failed', got '{other}'"),
            )),
        }
    }
}

/// A tracked recurring behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub created_at: DateTime<Utc>,
}

/// A single day's recorded outcome for one habit.
///
/// At most one log exists per `(habit_id, date)`; the store upserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: i64,
    pub habit_id: i64,
    pub status: LogStatus,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!("good".parse::<HabitType>().unwrap(), HabitType::Good);
        assert_eq!("bad".parse::<HabitType>().unwrap(), HabitType::Bad);
        assert_eq!("failed".parse::<LogStatus>().unwrap(), LogStatus::Failed);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!("neutral".parse::<HabitType>().is_err());
        assert!("Completed".parse::<LogStatus>().is_err());
        assert!("".parse::<LogStatus>().is_err());
    }

    #[test]
    fn habit_serializes_type_field() {
        let habit = Habit {
            id: 1,
            name: "Read".into(),
            habit_type: HabitType::Good,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["type"], "good");
    }

    #[test]
    fn log_date_serializes_as_calendar_day() {
        let log = HabitLog {
            id: 1,
            habit_id: 1,
            status: LogStatus::Completed,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["status"], "completed");
    }
}
