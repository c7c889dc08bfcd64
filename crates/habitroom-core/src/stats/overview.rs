use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{
    FocusSession, Habit, HabitLog, HabitType, Principle, PrincipleStatus, Task, TaskStatus,
};
use crate::streak::{habit_stats, percentage, today_snapshot, HabitStats, TodaySnapshot};

/// Whether `created_at` falls within the last `window_days` whole days.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>, window_days: u32) -> bool {
    (now - created_at).num_days() < i64::from(window_days)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusOverview {
    pub total_minutes: u64,
    pub total_sessions: usize,
    pub achieved: usize,
    pub achievement_rate: u32,
    pub recent_sessions: usize,
}

impl FocusOverview {
    pub fn from_sessions(sessions: &[FocusSession], now: DateTime<Utc>, window_days: u32) -> Self {
        let achieved = sessions.iter().filter(|s| s.achieved).count();
        Self {
            total_minutes: sessions.iter().map(|s| u64::from(s.duration_minutes)).sum(),
            total_sessions: sessions.len(),
            achieved,
            achievement_rate: percentage(achieved, sessions.len()),
            recent_sessions: sessions
                .iter()
                .filter(|s| is_recent(s.created_at, now, window_days))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskOverview {
    pub total: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub ongoing_percentage: u32,
    pub completion_rate: u32,
    pub recent: usize,
}

impl TaskOverview {
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>, window_days: u32) -> Self {
        let ongoing = tasks.iter().filter(|t| t.status == TaskStatus::Ongoing).count();
        let completed = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
        Self {
            total: tasks.len(),
            ongoing,
            completed,
            ongoing_percentage: percentage(ongoing, tasks.len()),
            completion_rate: percentage(completed, tasks.len()),
            recent: tasks
                .iter()
                .filter(|t| is_recent(t.created_at, now, window_days))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrincipleOverview {
    pub total: usize,
    pub testing: usize,
    pub tested: usize,
    pub recent: usize,
}

impl PrincipleOverview {
    pub fn from_principles(principles: &[Principle], now: DateTime<Utc>, window_days: u32) -> Self {
        Self {
            total: principles.len(),
            testing: principles
                .iter()
                .filter(|p| p.status == PrincipleStatus::Testing)
                .count(),
            tested: principles
                .iter()
                .filter(|p| p.status == PrincipleStatus::Tested)
                .count(),
            recent: principles
                .iter()
                .filter(|p| is_recent(p.created_at, now, window_days))
                .count(),
        }
    }
}

/// A habit together with its computed statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit: Habit,
    pub stats: HabitStats,
}

impl HabitSummary {
    /// Summaries for every habit, in the order given.
    pub fn for_all(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> Vec<Self> {
        habits
            .iter()
            .map(|habit| HabitSummary {
                habit: habit.clone(),
                stats: habit_stats(habit, logs, today),
            })
            .collect()
    }
}

/// Records a dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub habits: &'a [Habit],
    pub logs: &'a [HabitLog],
    pub tasks: &'a [Task],
    pub sessions: &'a [FocusSession],
    pub principles: &'a [Principle],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub principles: PrincipleOverview,
    pub focus: FocusOverview,
    pub tasks: TaskOverview,
    pub today: TodaySnapshot,
    pub good_habits: Vec<HabitSummary>,
    pub bad_habits: Vec<HabitSummary>,
}

impl Dashboard {
    pub fn build(
        input: DashboardInput<'_>,
        today: NaiveDate,
        now: DateTime<Utc>,
        recent_window_days: u32,
    ) -> Self {
        let (good_habits, bad_habits) = HabitSummary::for_all(input.habits, input.logs, today)
            .into_iter()
            .partition(|summary| summary.habit.habit_type == HabitType::Good);

        Self {
            principles: PrincipleOverview::from_principles(input.principles, now, recent_window_days),
            focus: FocusOverview::from_sessions(input.sessions, now, recent_window_days),
            tasks: TaskOverview::from_tasks(input.tasks, now, recent_window_days),
            today: today_snapshot(input.habits, input.logs, today),
            good_habits,
            bad_habits,
        }
    }
}
