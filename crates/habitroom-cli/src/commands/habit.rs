//! Habit and habit-log commands.

use std::path::Path;

use chrono::NaiveDate;
use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::tracker::{CreateHabit, LogHabit, UpdateHabit};
use habitroom_core::{local_today, LogStatus};
use serde_json::json;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits, newest first
    List,
    /// Create a habit
    Create {
        /// Habit name
        name: String,
        /// Habit type: good or bad
        #[arg(long = "type")]
        habit_type: String,
    },
    /// Rename a habit or change its type
    Update {
        /// Habit ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// New type; existing logs are kept as recorded
        #[arg(long = "type")]
        habit_type: Option<String>,
    },
    /// Delete a habit and its logs
    Delete {
        /// Habit ID
        id: i64,
    },
    /// List habit logs, newest first
    Logs {
        /// Only this habit's logs
        #[arg(long)]
        habit: Option<i64>,
    },
    /// Record a day's outcome (updates that day's log if present)
    Log {
        /// Habit ID
        id: i64,
        /// completed or failed
        #[arg(long)]
        status: String,
        /// Day to log (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Log today if not yet logged, otherwise remove today's log
    Toggle {
        /// Habit ID
        id: i64,
        #[arg(long, default_value = "completed")]
        status: LogStatus,
        /// Day to treat as today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a single log
    Unlog {
        /// Log ID
        log_id: i64,
    },
    /// Delete every log on a day
    ResetDay {
        /// Day to clear (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Streaks and success rates
    Stats {
        /// Only this habit
        id: Option<i64>,
        /// Day to treat as today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Heatmap cells for a habit
    Calendar {
        /// Habit ID
        id: i64,
        /// Day to treat as today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: HabitAction, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;

    match action {
        HabitAction::List => print_json(&tracker.list_habits()?)?,
        HabitAction::Create { name, habit_type } => {
            let habit = tracker.create_habit(CreateHabit {
                name: Some(name),
                habit_type: Some(habit_type),
            })?;
            print_json(&habit)?;
        }
        HabitAction::Update {
            id,
            name,
            habit_type,
        } => {
            let habit = tracker.update_habit(UpdateHabit {
                id: Some(id),
                name,
                habit_type,
            })?;
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            tracker.delete_habit(id)?;
            print_json(&json!({ "deleted": id }))?;
        }
        HabitAction::Logs { habit } => {
            let logs = match habit {
                Some(habit_id) => tracker.list_logs_for_habit(habit_id)?,
                None => tracker.list_logs()?,
            };
            print_json(&logs)?;
        }
        HabitAction::Log { id, status, date } => {
            let (log, created) = tracker.log_habit(
                LogHabit {
                    habit_id: Some(id),
                    status: Some(status),
                    date,
                },
                local_today(),
            )?;
            print_json(&json!({ "log": log, "created": created }))?;
        }
        HabitAction::Toggle { id, status, date } => {
            let outcome = tracker.toggle_today(id, status, date.unwrap_or_else(local_today))?;
            print_json(&outcome)?;
        }
        HabitAction::Unlog { log_id } => {
            tracker.delete_log(log_id)?;
            print_json(&json!({ "deleted": log_id }))?;
        }
        HabitAction::ResetDay { date } => {
            let date = date.unwrap_or_else(local_today);
            let removed = tracker.reset_day(date)?;
            print_json(&json!({ "date": date, "removed": removed }))?;
        }
        HabitAction::Stats { id, date } => {
            let today = date.unwrap_or_else(local_today);
            match id {
                Some(id) => print_json(&tracker.habit_summary(id, today)?)?,
                None => print_json(&tracker.habit_overview(today)?)?,
            }
        }
        HabitAction::Calendar { id, date } => {
            let cells = tracker.habit_calendar(id, date.unwrap_or_else(local_today))?;
            print_json(&cells)?;
        }
    }
    Ok(())
}
