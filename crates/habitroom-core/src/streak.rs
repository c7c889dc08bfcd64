//! Streak and success statistics over habit logs.
//!
//! All functions are pure: callers pass the logs and the local calendar
//! day they consider "today". Two success policies coexist:
//!
//! - [`current_streak`] is type-agnostic and only counts `completed` days.
//! - [`best_streak`], [`success_rate`], [`today_snapshot`] and
//!   [`habit_calendar`] use [`is_success`], under which a bad habit
//!   succeeds on any day not explicitly logged as `failed`.

use std::collections::HashSet;

use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::{Habit, HabitLog, HabitType, LogStatus};

/// A dated outcome that the streak functions can walk over.
pub trait DayOutcome {
    fn date(&self) -> NaiveDate;
    fn status(&self) -> LogStatus;
}

impl DayOutcome for HabitLog {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn status(&self) -> LogStatus {
        self.status
    }
}

impl DayOutcome for (NaiveDate, LogStatus) {
    fn date(&self) -> NaiveDate {
        self.0
    }

    fn status(&self) -> LogStatus {
        self.1
    }
}

/// Whether a logged status counts favorably for a habit of `habit_type`.
pub fn is_success(status: LogStatus, habit_type: HabitType) -> bool {
    match habit_type {
        HabitType::Good => status == LogStatus::Completed,
        HabitType::Bad => status != LogStatus::Failed,
    }
}

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Consecutive `completed` days ending today.
///
/// Walks the logs newest first; the log at position `d` must be dated
/// `today - d` and be completed. A chain that skips today yields 0.
pub fn current_streak<L: DayOutcome>(logs: &[L], today: NaiveDate) -> u32 {
    let mut sorted: Vec<&L> = logs.iter().collect();
    sorted.sort_by_key(|log| std::cmp::Reverse(log.date()));

    let mut streak = 0u32;
    let mut expected = today;
    for log in sorted {
        if log.date() != expected || log.status() != LogStatus::Completed {
            break;
        }
        streak += 1;
        expected -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive success days in the history.
///
/// Only logged days are considered: a missing day always breaks the run,
/// even for bad habits.
pub fn best_streak<L: DayOutcome>(habit_type: HabitType, logs: &[L]) -> u32 {
    let mut sorted: Vec<&L> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date());

    let mut max_streak = 0u32;
    let mut running = 0u32;
    let mut prev_date: Option<NaiveDate> = None;

    for log in sorted {
        let date = log.date();
        if is_success(log.status(), habit_type) {
            let follows = prev_date.map_or(true, |prev| prev + Duration::days(1) == date);
            running = if follows { running + 1 } else { 1 };
            max_streak = max_streak.max(running);
        } else {
            running = 0;
        }
        prev_date = Some(date);
    }
    max_streak
}

/// Share of logged days that were successes, as a rounded percentage.
pub fn success_rate<L: DayOutcome>(habit_type: HabitType, logs: &[L]) -> u32 {
    let successful = count_successes(habit_type, logs);
    percentage(successful, logs.len())
}

fn count_successes<L: DayOutcome>(habit_type: HabitType, logs: &[L]) -> usize {
    logs.iter()
        .filter(|log| is_success(log.status(), habit_type))
        .count()
}

/// Same-day progress for good habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoodProgress {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

/// Same-day progress for bad habits. Unlogged habits count as avoided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BadProgress {
    pub total: usize,
    pub avoided: usize,
    pub failed: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodaySnapshot {
    pub good_habits: GoodProgress,
    pub bad_habits: BadProgress,
}

/// Completion snapshot for `today` across all habits.
pub fn today_snapshot(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> TodaySnapshot {
    let good: HashSet<i64> = habits
        .iter()
        .filter(|h| h.habit_type == HabitType::Good)
        .map(|h| h.id)
        .collect();
    let bad: HashSet<i64> = habits
        .iter()
        .filter(|h| h.habit_type == HabitType::Bad)
        .map(|h| h.id)
        .collect();

    let mut completed_good = HashSet::new();
    let mut failed_bad = HashSet::new();
    for log in logs.iter().filter(|log| log.date == today) {
        match log.status {
            LogStatus::Completed if good.contains(&log.habit_id) => {
                completed_good.insert(log.habit_id);
            }
            LogStatus::Failed if bad.contains(&log.habit_id) => {
                failed_bad.insert(log.habit_id);
            }
            _ => {}
        }
    }

    let avoided = bad.len() - failed_bad.len();
    TodaySnapshot {
        good_habits: GoodProgress {
            total: good.len(),
            completed: completed_good.len(),
            percentage: percentage(completed_good.len(), good.len()),
        },
        bad_habits: BadProgress {
            total: bad.len(),
            avoided,
            failed: failed_bad.len(),
            percentage: percentage(avoided, bad.len()),
        },
    }
}

/// Per-habit figures shown on the dashboard and habits view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub current_streak: u32,
    pub best_streak: u32,
    pub success_rate: u32,
    pub total_days: usize,
    pub successful_days: usize,
    pub today_status: Option<LogStatus>,
}

/// Statistics for `habit`. `logs` may contain other habits' logs; they are
/// ignored.
pub fn habit_stats(habit: &Habit, logs: &[HabitLog], today: NaiveDate) -> HabitStats {
    let own: Vec<HabitLog> = logs
        .iter()
        .filter(|log| log.habit_id == habit.id)
        .cloned()
        .collect();

    let successful_days = count_successes(habit.habit_type, &own);
    HabitStats {
        current_streak: current_streak(&own, today),
        best_streak: best_streak(habit.habit_type, &own),
        success_rate: percentage(successful_days, own.len()),
        total_days: own.len(),
        successful_days,
        today_status: own.iter().find(|log| log.date == today).map(|log| log.status),
    }
}

/// Heatmap shading for one logged day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellLevel {
    Success,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub level: CellLevel,
}

/// Heatmap cells for the logged days in `[today - history_days, today]`,
/// oldest first. Days without a log produce no cell. A window reaching
/// past the earliest representable date covers all history.
pub fn habit_calendar<L: DayOutcome>(
    habit_type: HabitType,
    logs: &[L],
    today: NaiveDate,
    history_days: u32,
) -> Vec<CalendarCell> {
    let start = today
        .checked_sub_days(Days::new(u64::from(history_days)))
        .unwrap_or(NaiveDate::MIN);
    let mut cells: Vec<CalendarCell> = logs
        .iter()
        .filter(|log| log.date() >= start && log.date() <= today)
        .map(|log| CalendarCell {
            date: log.date(),
            level: if is_success(log.status(), habit_type) {
                CellLevel::Success
            } else {
                CellLevel::Miss
            },
        })
        .collect();
    cells.sort_by_key(|cell| cell.date);
    cells
}
