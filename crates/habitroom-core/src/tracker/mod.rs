//! Validated operations over the record store.
//!
//! [`Tracker`] is the boundary presenters talk to. Each operation checks
//! the required fields of its request, parses enum and date strings into
//! records, confirms referenced parents exist, and then issues the store
//! calls. Statistics are computed from freshly listed records on every
//! call; nothing is cached between operations.

mod requests;

pub use requests::{
    CreateHabit, CreatePrinciple, CreateQuestion, CreateTask, LogHabit, QuestionFilter,
    RecordFocusSession, UpdateHabit, UpdatePrinciple, UpdateQuestion, UpdateTaskStatus,
};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result, ValidationError};
use crate::focus_timer::FocusTimer;
use crate::records::{
    FocusSession, Habit, HabitLog, HabitType, LogStatus, Principle, PrincipleStatus, Question,
    QuestionCategory, Task, TaskStatus,
};
use crate::stats::{Dashboard, DashboardInput, HabitSummary};
use crate::storage::{Config, Database, HabitChanges, NewPrinciple, PrincipleChanges};
use crate::streak::{habit_calendar, habit_stats, CalendarCell};
use requests::{parse_date, present};

/// The local calendar day, used wherever an operation means "today".
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Result of toggling today's log for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "log", rename_all = "lowercase")]
pub enum ToggleOutcome {
    /// No log existed; one was created.
    Logged(HabitLog),
    /// A log existed and was removed.
    Unlogged(HabitLog),
}

/// A principle together with the question it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipleDetail {
    pub principle: Principle,
    pub question: Question,
}

pub struct Tracker {
    db: Database,
    recent_window_days: u32,
    history_days: u32,
}

impl Tracker {
    pub fn new(db: Database) -> Self {
        Self::with_config(db, &Config::default())
    }

    pub fn with_config(db: Database, config: &Config) -> Self {
        Self {
            db,
            recent_window_days: config.stats.recent_window_days,
            history_days: config.calendar.history_days,
        }
    }

    fn require_habit(&self, id: i64) -> Result<Habit> {
        self.db
            .get_habit(id)?
            .ok_or_else(|| CoreError::not_found("Habit", id))
    }

    fn require_question(&self, id: i64) -> Result<Question> {
        self.db
            .get_question(id)?
            .ok_or_else(|| CoreError::not_found("Question", id))
    }

    // === Habits ===

    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        Ok(self.db.list_habits()?)
    }

    pub fn create_habit(&self, req: CreateHabit) -> Result<Habit> {
        let (Some(name), Some(raw_type)) = (present(req.name), present(req.habit_type)) else {
            return Err(ValidationError::MissingFields("Name and type are required").into());
        };
        let habit_type: HabitType = raw_type.parse()?;

        let habit = self.db.insert_habit(&name, habit_type)?;
        info!(habit_id = habit.id, habit_type = %habit_type, "habit created");
        Ok(habit)
    }

    /// Rename a habit or change its type. Logs are kept as recorded and
    /// statistics re-derive under the new type.
    pub fn update_habit(&self, req: UpdateHabit) -> Result<Habit> {
        let Some(id) = req.id else {
            return Err(ValidationError::MissingFields("ID is required").into());
        };
        let changes = HabitChanges {
            name: present(req.name),
            habit_type: present(req.habit_type)
                .map(|t| t.parse::<HabitType>())
                .transpose()?,
        };

        let habit = self
            .db
            .update_habit(id, &changes)?
            .ok_or_else(|| CoreError::not_found("Habit", id))?;
        info!(habit_id = id, "habit updated");
        Ok(habit)
    }

    /// Delete a habit and all of its logs.
    pub fn delete_habit(&self, id: i64) -> Result<()> {
        let habit = self.require_habit(id)?;
        let logs = self.db.list_logs_for_habit(id)?;
        if !self.db.delete_habit(id)? {
            return Err(CoreError::not_found("Habit", id));
        }
        info!(habit_id = id, name = %habit.name, removed_logs = logs.len(), "habit deleted");
        Ok(())
    }

    // === Habit logs ===

    pub fn list_logs(&self) -> Result<Vec<HabitLog>> {
        Ok(self.db.list_logs()?)
    }

    pub fn list_logs_for_habit(&self, habit_id: i64) -> Result<Vec<HabitLog>> {
        self.require_habit(habit_id)?;
        Ok(self.db.list_logs_for_habit(habit_id)?)
    }

    /// Record a day's outcome, updating that day's log if one exists.
    ///
    /// Returns the log and whether it was newly created.
    pub fn log_habit(&self, req: LogHabit, today: NaiveDate) -> Result<(HabitLog, bool)> {
        let (Some(habit_id), Some(raw_status)) = (req.habit_id, present(req.status)) else {
            return Err(ValidationError::MissingFields("Habit ID and status are required").into());
        };
        let status: LogStatus = raw_status.parse()?;
        let date = match present(req.date) {
            Some(raw) => parse_date(&raw)?,
            None => today,
        };
        self.require_habit(habit_id)?;

        let (log, created) = self.db.upsert_log(habit_id, date, status)?;
        info!(habit_id, log_id = log.id, %date, %status, created, "habit logged");
        Ok((log, created))
    }

    /// Remove today's log for a habit if there is one, otherwise create it
    /// with `status`.
    pub fn toggle_today(
        &self,
        habit_id: i64,
        status: LogStatus,
        today: NaiveDate,
    ) -> Result<ToggleOutcome> {
        self.require_habit(habit_id)?;
        match self.db.find_log(habit_id, today)? {
            Some(existing) => {
                self.delete_log(existing.id)?;
                Ok(ToggleOutcome::Unlogged(existing))
            }
            None => {
                let (log, _) = self.db.upsert_log(habit_id, today, status)?;
                info!(habit_id, log_id = log.id, %status, "habit logged for today");
                Ok(ToggleOutcome::Logged(log))
            }
        }
    }

    pub fn delete_log(&self, id: i64) -> Result<()> {
        let log = self
            .db
            .get_log(id)?
            .ok_or_else(|| CoreError::not_found("HabitLog", id))?;
        if !self.db.delete_log(id)? {
            return Err(CoreError::not_found("HabitLog", id));
        }
        info!(log_id = id, habit_id = log.habit_id, date = %log.date, "habit log deleted");
        Ok(())
    }

    /// Delete every habit log dated `date`. Returns how many were removed.
    pub fn reset_day(&self, date: NaiveDate) -> Result<usize> {
        let removed = self.db.delete_logs_on(date)?;
        info!(%date, removed, "day reset");
        Ok(removed)
    }

    // === Tasks ===

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.db.list_tasks()?)
    }

    pub fn create_task(&self, req: CreateTask) -> Result<Task> {
        let Some(title) = present(req.title) else {
            return Err(ValidationError::MissingFields("Title is required").into());
        };
        let task = self.db.insert_task(&title)?;
        info!(task_id = task.id, "task created");
        Ok(task)
    }

    pub fn set_task_status(&self, req: UpdateTaskStatus, now: DateTime<Utc>) -> Result<Task> {
        let (Some(id), Some(raw_status)) = (req.id, present(req.status)) else {
            return Err(ValidationError::MissingFields("ID and status are required").into());
        };
        let status: TaskStatus = raw_status.parse()?;

        let task = self
            .db
            .update_task_status(id, status, now)?
            .ok_or_else(|| CoreError::not_found("Task", id))?;
        info!(task_id = id, %status, "task status changed");
        Ok(task)
    }

    pub fn delete_task(&self, id: i64) -> Result<()> {
        if !self.db.delete_task(id)? {
            return Err(CoreError::not_found("Task", id));
        }
        info!(task_id = id, "task deleted");
        Ok(())
    }

    /// Delete all completed tasks in one statement.
    pub fn clear_completed_tasks(&self) -> Result<usize> {
        let removed = self.db.delete_tasks_with_status(TaskStatus::Completed)?;
        info!(removed, "completed tasks cleared");
        Ok(removed)
    }

    // === Focus sessions ===

    pub fn list_focus_sessions(&self) -> Result<Vec<FocusSession>> {
        Ok(self.db.list_focus_sessions()?)
    }

    /// Store a finished focus session.
    pub fn record_focus_session(&self, req: RecordFocusSession) -> Result<FocusSession> {
        let (Some(duration), Some(goal)) = (
            req.duration_minutes.filter(|minutes| *minutes > 0),
            present(req.goal),
        ) else {
            return Err(ValidationError::MissingFields("Duration and goal are required").into());
        };
        let achieved = req.achieved.unwrap_or(false);

        let session = self.db.insert_focus_session(duration, &goal, achieved)?;
        info!(session_id = session.id, duration, achieved, "focus session recorded");
        Ok(session)
    }

    /// Record the session a finished timer was counting down.
    ///
    /// The planned duration is stored even when the timer was stopped early.
    pub fn complete_focus_timer(&self, timer: &FocusTimer, achieved: bool) -> Result<FocusSession> {
        if !timer.is_finished() {
            return Err(ValidationError::invalid("timer", "the session is still in progress").into());
        }
        self.record_focus_session(RecordFocusSession {
            duration_minutes: Some(timer.duration_minutes()),
            goal: Some(timer.goal().to_string()),
            achieved: Some(achieved),
        })
    }

    pub fn clear_focus_sessions(&self) -> Result<usize> {
        let removed = self.db.delete_all_focus_sessions()?;
        info!(removed, "focus sessions cleared");
        Ok(removed)
    }

    // === Questions ===

    pub fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let category = filter
            .category
            .as_deref()
            .map(str::parse::<QuestionCategory>)
            .transpose()?;
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let questions = self
            .db
            .list_questions()?
            .into_iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .filter(|q| {
                needle
                    .as_deref()
                    .map_or(true, |n| q.title.to_lowercase().contains(n))
            })
            .collect();
        Ok(questions)
    }

    pub fn get_question(&self, id: i64) -> Result<Question> {
        self.require_question(id)
    }

    pub fn create_question(&self, req: CreateQuestion) -> Result<Question> {
        let (Some(title), Some(raw_category)) = (present(req.title), present(req.category)) else {
            return Err(ValidationError::MissingFields("Title and category are required").into());
        };
        let category: QuestionCategory = raw_category.parse()?;

        let question = self.db.insert_question(&title, category)?;
        info!(question_id = question.id, %category, "question created");
        Ok(question)
    }

    pub fn update_question(&self, req: UpdateQuestion) -> Result<Question> {
        let Some(id) = req.id else {
            return Err(ValidationError::MissingFields("ID is required").into());
        };
        let title = present(req.title);
        let category = present(req.category)
            .map(|c| c.parse::<QuestionCategory>())
            .transpose()?;

        let question = self
            .db
            .update_question(id, title.as_deref(), category)?
            .ok_or_else(|| CoreError::not_found("Question", id))?;
        info!(question_id = id, "question updated");
        Ok(question)
    }

    /// Delete a question and all of its principles.
    pub fn delete_question(&self, id: i64) -> Result<()> {
        if !self.db.delete_question(id)? {
            return Err(CoreError::not_found("Question", id));
        }
        info!(question_id = id, "question deleted");
        Ok(())
    }

    // === Principles ===

    pub fn list_principles(&self, question_id: Option<i64>) -> Result<Vec<Principle>> {
        Ok(self.db.list_principles(question_id)?)
    }

    pub fn get_principle(&self, id: i64) -> Result<Principle> {
        self.db
            .get_principle(id)?
            .ok_or_else(|| CoreError::not_found("Principle", id))
    }

    pub fn principle_detail(&self, id: i64) -> Result<PrincipleDetail> {
        let principle = self.get_principle(id)?;
        let question = self.require_question(principle.question_id)?;
        Ok(PrincipleDetail {
            principle,
            question,
        })
    }

    /// Add a principle under a question, starting in `testing`.
    pub fn create_principle(&self, req: CreatePrinciple) -> Result<Principle> {
        let (Some(question_id), Some(title)) = (req.question_id, present(req.title)) else {
            return Err(ValidationError::MissingFields("Question ID and title are required").into());
        };
        self.require_question(question_id)?;

        let principle = self.db.insert_principle(&NewPrinciple {
            question_id,
            title,
            description: present(req.description),
            examples: present(req.examples),
        })?;
        info!(principle_id = principle.id, question_id, "principle created");
        Ok(principle)
    }

    pub fn update_principle(&self, req: UpdatePrinciple) -> Result<Principle> {
        let (Some(id), Some(title)) = (req.id, present(req.title)) else {
            return Err(ValidationError::MissingFields("ID and title are required").into());
        };
        let status = present(req.status)
            .map(|s| s.parse::<PrincipleStatus>())
            .transpose()?;

        let principle = self
            .db
            .update_principle(
                id,
                &PrincipleChanges {
                    title,
                    description: present(req.description),
                    examples: present(req.examples),
                    status,
                },
            )?
            .ok_or_else(|| CoreError::not_found("Principle", id))?;
        info!(principle_id = id, status = %principle.status, "principle updated");
        Ok(principle)
    }

    pub fn delete_principle(&self, id: i64) -> Result<()> {
        if !self.db.delete_principle(id)? {
            return Err(CoreError::not_found("Principle", id));
        }
        info!(principle_id = id, "principle deleted");
        Ok(())
    }

    // === Statistics ===

    /// Every habit with its statistics as of `today`.
    pub fn habit_overview(&self, today: NaiveDate) -> Result<Vec<HabitSummary>> {
        let habits = self.db.list_habits()?;
        let logs = self.db.list_logs()?;
        debug!(habits = habits.len(), logs = logs.len(), "computing habit overview");
        Ok(HabitSummary::for_all(&habits, &logs, today))
    }

    pub fn habit_summary(&self, habit_id: i64, today: NaiveDate) -> Result<HabitSummary> {
        let habit = self.require_habit(habit_id)?;
        let logs = self.db.list_logs_for_habit(habit_id)?;
        let stats = habit_stats(&habit, &logs, today);
        Ok(HabitSummary { habit, stats })
    }

    /// Heatmap cells for a habit over the configured history window.
    pub fn habit_calendar(&self, habit_id: i64, today: NaiveDate) -> Result<Vec<CalendarCell>> {
        let habit = self.require_habit(habit_id)?;
        let logs = self.db.list_logs_for_habit(habit_id)?;
        Ok(habit_calendar(
            habit.habit_type,
            &logs,
            today,
            self.history_days,
        ))
    }

    pub fn dashboard(&self, today: NaiveDate, now: DateTime<Utc>) -> Result<Dashboard> {
        let habits = self.db.list_habits()?;
        let logs = self.db.list_logs()?;
        let tasks = self.db.list_tasks()?;
        let sessions = self.db.list_focus_sessions()?;
        let principles = self.db.list_principles(None)?;
        debug!(
            habits = habits.len(),
            logs = logs.len(),
            tasks = tasks.len(),
            sessions = sessions.len(),
            principles = principles.len(),
            "computing dashboard"
        );

        Ok(Dashboard::build(
            DashboardInput {
                habits: &habits,
                logs: &logs,
                tasks: &tasks,
                sessions: &sessions,
                principles: &principles,
            },
            today,
            now,
            self.recent_window_days,
        ))
    }
}
