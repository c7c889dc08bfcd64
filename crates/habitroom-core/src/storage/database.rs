//! SQLite-based record storage.
//!
//! Provides persistent storage for:
//! - Habits and their daily logs
//! - Tasks and focus sessions
//! - Questions and the principles attached to them
//!
//! Every table supports ordered listing, lookup by id, insert, update,
//! delete by id, and the bulk "delete where" statements the tracker needs.
//! Deletes report whether a row was removed so callers can surface
//! not-found.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::migrations;
use crate::error::{DatabaseError, ValidationError};
use crate::records::{
    FocusSession, Habit, HabitLog, HabitType, LogStatus, Principle, PrincipleStatus, Question,
    QuestionCategory, Task, TaskStatus, DATE_FORMAT,
};

// === Column helpers ===

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Read an RFC 3339 timestamp. Malformed values are an error, not a fallback.
fn column_datetime(row: &Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn column_opt_datetime(row: &Row, idx: usize) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}

fn column_date(row: &Row, idx: usize) -> Result<NaiveDate, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn column_enum<T>(row: &Row, idx: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr<Err = ValidationError>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_error(idx, e))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// === Row mappers ===

fn row_to_habit(row: &Row) -> Result<Habit, rusqlite::Error> {
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        habit_type: column_enum::<HabitType>(row, 2)?,
        created_at: column_datetime(row, 3)?,
    })
}

fn row_to_log(row: &Row) -> Result<HabitLog, rusqlite::Error> {
    Ok(HabitLog {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        status: column_enum::<LogStatus>(row, 2)?,
        date: column_date(row, 3)?,
        created_at: column_datetime(row, 4)?,
    })
}

fn row_to_task(row: &Row) -> Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        status: column_enum::<TaskStatus>(row, 2)?,
        created_at: column_datetime(row, 3)?,
        completed_at: column_opt_datetime(row, 4)?,
    })
}

fn row_to_focus_session(row: &Row) -> Result<FocusSession, rusqlite::Error> {
    Ok(FocusSession {
        id: row.get(0)?,
        duration_minutes: row.get(1)?,
        goal: row.get(2)?,
        achieved: row.get(3)?,
        created_at: column_datetime(row, 4)?,
    })
}

fn row_to_question(row: &Row) -> Result<Question, rusqlite::Error> {
    Ok(Question {
        id: row.get(0)?,
        title: row.get(1)?,
        category: column_enum::<QuestionCategory>(row, 2)?,
        created_at: column_datetime(row, 3)?,
        updated_at: column_datetime(row, 4)?,
    })
}

fn row_to_principle(row: &Row) -> Result<Principle, rusqlite::Error> {
    Ok(Principle {
        id: row.get(0)?,
        question_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        examples: row.get(4)?,
        status: column_enum::<PrincipleStatus>(row, 5)?,
        created_at: column_datetime(row, 6)?,
        updated_at: column_datetime(row, 7)?,
    })
}

const HABIT_COLUMNS: &str = "id, name, type, created_at";
const LOG_COLUMNS: &str = "id, habit_id, status, date, created_at";
const TASK_COLUMNS: &str = "id, title, status, created_at, completed_at";
const FOCUS_COLUMNS: &str = "id, duration_minutes, goal, achieved, created_at";
const QUESTION_COLUMNS: &str = "id, title, category, created_at, updated_at";
const PRINCIPLE_COLUMNS: &str =
    "id, question_id, title, description, examples, status, created_at, updated_at";

// === Change sets ===

/// Fields of a habit to overwrite; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub habit_type: Option<HabitType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrinciple {
    pub question_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub examples: Option<String>,
}

/// Principle update. `description` and `examples` are replaced (absent
/// clears them); `status` is kept when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipleChanges {
    pub title: String,
    pub description: Option<String>,
    pub examples: Option<String>,
    pub status: Option<PrincipleStatus>,
}

/// SQLite database for habit tracking records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (creating if needed) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "database opened");
        Self::init(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_all<T>(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
        map: fn(&Row) -> Result<T, rusqlite::Error>,
    ) -> Result<Vec<T>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        rows.collect()
    }

    // === Habits ===

    /// All habits, newest first.
    pub fn list_habits(&self) -> Result<Vec<Habit>, rusqlite::Error> {
        self.query_all(
            &format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY created_at DESC, id DESC"),
            [],
            row_to_habit,
        )
    }

    pub fn get_habit(&self, id: i64) -> Result<Option<Habit>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
                params![id],
                row_to_habit,
            )
            .optional()
    }

    pub fn insert_habit(&self, name: &str, habit_type: HabitType) -> Result<Habit, rusqlite::Error> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO habits (name, type, created_at) VALUES (?1, ?2, ?3)",
            params![name, habit_type.as_str(), created_at.to_rfc3339()],
        )?;
        Ok(Habit {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            habit_type,
            created_at,
        })
    }

    /// Apply `changes` to a habit. Returns `None` if the habit does not exist.
    ///
    /// Existing logs are left untouched when the type changes.
    pub fn update_habit(
        &self,
        id: i64,
        changes: &HabitChanges,
    ) -> Result<Option<Habit>, rusqlite::Error> {
        let updated = self.conn.execute(
            "UPDATE habits
             SET name = COALESCE(?2, name),
                 type = COALESCE(?3, type)
             WHERE id = ?1",
            params![
                id,
                changes.name,
                changes.habit_type.map(|t| t.as_str()),
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_habit(id)
    }

    /// Delete a habit and, through the foreign key, all of its logs.
    pub fn delete_habit(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Habit logs ===

    /// All logs, most recent day first.
    pub fn list_logs(&self) -> Result<Vec<HabitLog>, rusqlite::Error> {
        self.query_all(
            &format!("SELECT {LOG_COLUMNS} FROM habit_logs ORDER BY date DESC, id DESC"),
            [],
            row_to_log,
        )
    }

    pub fn list_logs_for_habit(&self, habit_id: i64) -> Result<Vec<HabitLog>, rusqlite::Error> {
        self.query_all(
            &format!(
                "SELECT {LOG_COLUMNS} FROM habit_logs WHERE habit_id = ?1 ORDER BY date DESC, id DESC"
            ),
            params![habit_id],
            row_to_log,
        )
    }

    pub fn get_log(&self, id: i64) -> Result<Option<HabitLog>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {LOG_COLUMNS} FROM habit_logs WHERE id = ?1"),
                params![id],
                row_to_log,
            )
            .optional()
    }

    pub fn find_log(
        &self,
        habit_id: i64,
        date: NaiveDate,
    ) -> Result<Option<HabitLog>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {LOG_COLUMNS} FROM habit_logs WHERE habit_id = ?1 AND date = ?2
                     ORDER BY id LIMIT 1"
                ),
                params![habit_id, format_date(date)],
                row_to_log,
            )
            .optional()
    }

    /// Record `status` for a habit on `date`.
    ///
    /// Updates the existing log for that day if there is one, otherwise
    /// inserts. Returns the log and whether it was newly created.
    pub fn upsert_log(
        &self,
        habit_id: i64,
        date: NaiveDate,
        status: LogStatus,
    ) -> Result<(HabitLog, bool), rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;

        let result = match self.find_log(habit_id, date)? {
            Some(existing) => {
                tx.execute(
                    "UPDATE habit_logs SET status = ?2 WHERE id = ?1",
                    params![existing.id, status.as_str()],
                )?;
                (HabitLog { status, ..existing }, false)
            }
            None => {
                let created_at = Utc::now();
                tx.execute(
                    "INSERT INTO habit_logs (habit_id, status, date, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        habit_id,
                        status.as_str(),
                        format_date(date),
                        created_at.to_rfc3339()
                    ],
                )?;
                let log = HabitLog {
                    id: self.conn.last_insert_rowid(),
                    habit_id,
                    status,
                    date,
                    created_at,
                };
                (log, true)
            }
        };

        tx.commit()?;
        tracing::debug!(habit_id, %date, created = result.1, "habit log upserted");
        Ok(result)
    }

    pub fn delete_log(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM habit_logs WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Delete every log dated `date`, across all habits, in one statement.
    pub fn delete_logs_on(&self, date: NaiveDate) -> Result<usize, rusqlite::Error> {
        self.conn.execute(
            "DELETE FROM habit_logs WHERE date = ?1",
            params![format_date(date)],
        )
    }

    // === Tasks ===

    /// All tasks, newest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, rusqlite::Error> {
        self.query_all(
            &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"),
            [],
            row_to_task,
        )
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                row_to_task,
            )
            .optional()
    }

    /// Insert a new task in the `ongoing` state.
    pub fn insert_task(&self, title: &str) -> Result<Task, rusqlite::Error> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO tasks (title, status, created_at) VALUES (?1, ?2, ?3)",
            params![title, TaskStatus::Ongoing.as_str(), created_at.to_rfc3339()],
        )?;
        Ok(Task {
            id: self.conn.last_insert_rowid(),
            title: title.to_string(),
            status: TaskStatus::Ongoing,
            created_at,
            completed_at: None,
        })
    }

    /// Set a task's status. `completed_at` becomes `now` when the status is
    /// `Completed` and is cleared otherwise.
    pub fn update_task_status(
        &self,
        id: i64,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Task>, rusqlite::Error> {
        let completed_at = (status == TaskStatus::Completed).then(|| now.to_rfc3339());
        let updated = self.conn.execute(
            "UPDATE tasks SET status = ?2, completed_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), completed_at],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_task(id)
    }

    pub fn delete_task(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn delete_tasks_with_status(&self, status: TaskStatus) -> Result<usize, rusqlite::Error> {
        self.conn.execute(
            "DELETE FROM tasks WHERE status = ?1",
            params![status.as_str()],
        )
    }

    // === Focus sessions ===

    /// All focus sessions, newest first.
    pub fn list_focus_sessions(&self) -> Result<Vec<FocusSession>, rusqlite::Error> {
        self.query_all(
            &format!("SELECT {FOCUS_COLUMNS} FROM focus_sessions ORDER BY created_at DESC, id DESC"),
            [],
            row_to_focus_session,
        )
    }

    pub fn insert_focus_session(
        &self,
        duration_minutes: u32,
        goal: &str,
        achieved: bool,
    ) -> Result<FocusSession, rusqlite::Error> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO focus_sessions (duration_minutes, goal, achieved, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![duration_minutes, goal, achieved, created_at.to_rfc3339()],
        )?;
        Ok(FocusSession {
            id: self.conn.last_insert_rowid(),
            duration_minutes,
            goal: goal.to_string(),
            achieved,
            created_at,
        })
    }

    pub fn delete_all_focus_sessions(&self) -> Result<usize, rusqlite::Error> {
        self.conn.execute("DELETE FROM focus_sessions", [])
    }

    // === Questions ===

    /// All questions, newest first.
    pub fn list_questions(&self) -> Result<Vec<Question>, rusqlite::Error> {
        self.query_all(
            &format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at DESC, id DESC"),
            [],
            row_to_question,
        )
    }

    pub fn get_question(&self, id: i64) -> Result<Option<Question>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
                params![id],
                row_to_question,
            )
            .optional()
    }

    pub fn insert_question(
        &self,
        title: &str,
        category: QuestionCategory,
    ) -> Result<Question, rusqlite::Error> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO questions (title, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![title, category.as_str(), now.to_rfc3339()],
        )?;
        Ok(Question {
            id: self.conn.last_insert_rowid(),
            title: title.to_string(),
            category,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_question(
        &self,
        id: i64,
        title: Option<&str>,
        category: Option<QuestionCategory>,
    ) -> Result<Option<Question>, rusqlite::Error> {
        let updated = self.conn.execute(
            "UPDATE questions
             SET title = COALESCE(?2, title),
                 category = COALESCE(?3, category),
                 updated_at = ?4
             WHERE id = ?1",
            params![
                id,
                title,
                category.map(|c| c.as_str()),
                Utc::now().to_rfc3339()
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_question(id)
    }

    /// Delete a question and, through the foreign key, its principles.
    pub fn delete_question(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Principles ===

    /// Principles newest first, optionally restricted to one question.
    pub fn list_principles(
        &self,
        question_id: Option<i64>,
    ) -> Result<Vec<Principle>, rusqlite::Error> {
        match question_id {
            Some(qid) => self.query_all(
                &format!(
                    "SELECT {PRINCIPLE_COLUMNS} FROM principles WHERE question_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ),
                params![qid],
                row_to_principle,
            ),
            None => self.query_all(
                &format!(
                    "SELECT {PRINCIPLE_COLUMNS} FROM principles ORDER BY created_at DESC, id DESC"
                ),
                [],
                row_to_principle,
            ),
        }
    }

    pub fn get_principle(&self, id: i64) -> Result<Option<Principle>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {PRINCIPLE_COLUMNS} FROM principles WHERE id = ?1"),
                params![id],
                row_to_principle,
            )
            .optional()
    }

    /// Insert a principle in the `testing` state.
    pub fn insert_principle(&self, new: &NewPrinciple) -> Result<Principle, rusqlite::Error> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO principles
                (question_id, title, description, examples, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                new.question_id,
                new.title,
                new.description,
                new.examples,
                PrincipleStatus::Testing.as_str(),
                now.to_rfc3339()
            ],
        )?;
        Ok(Principle {
            id: self.conn.last_insert_rowid(),
            question_id: new.question_id,
            title: new.title.clone(),
            description: new.description.clone(),
            examples: new.examples.clone(),
            status: PrincipleStatus::Testing,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_principle(
        &self,
        id: i64,
        changes: &PrincipleChanges,
    ) -> Result<Option<Principle>, rusqlite::Error> {
        let updated = self.conn.execute(
            "UPDATE principles
             SET title = ?2,
                 description = ?3,
                 examples = ?4,
                 status = COALESCE(?5, status),
                 updated_at = ?6
             WHERE id = ?1",
            params![
                id,
                changes.title,
                changes.description,
                changes.examples,
                changes.status.map(|s| s.as_str()),
                Utc::now().to_rfc3339()
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_principle(id)
    }

    pub fn delete_principle(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM principles WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn habit_crud() {
        let db = Database::open_memory().unwrap();
        let habit = db.insert_habit("Meditate", HabitType::Good).unwrap();
        assert_eq!(db.get_habit(habit.id).unwrap().unwrap(), habit);

        let renamed = db
            .update_habit(
                habit.id,
                &HabitChanges {
                    name: Some("Meditate 10 min".into()),
                    habit_type: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Meditate 10 min");
        assert_eq!(renamed.habit_type, HabitType::Good);

        assert!(db.delete_habit(habit.id).unwrap());
        assert!(db.get_habit(habit.id).unwrap().is_none());
        assert!(!db.delete_habit(habit.id).unwrap());
    }

    #[test]
    fn update_missing_habit_returns_none() {
        let db = Database::open_memory().unwrap();
        let result = db.update_habit(42, &HabitChanges::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn upsert_updates_existing_day() {
        let db = Database::open_memory().unwrap();
        let habit = db.insert_habit("Run", HabitType::Good).unwrap();

        let (first, created) = db.upsert_log(habit.id, day(3), LogStatus::Failed).unwrap();
        assert!(created);
        let (second, created) = db.upsert_log(habit.id, day(3), LogStatus::Completed).unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);

        let logs = db.list_logs_for_habit(habit.id).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, LogStatus::Completed);
        assert_eq!(logs[0].date, day(3));
    }

    #[test]
    fn logs_are_listed_most_recent_first() {
        let db = Database::open_memory().unwrap();
        let habit = db.insert_habit("Run", HabitType::Good).unwrap();
        db.upsert_log(habit.id, day(1), LogStatus::Completed).unwrap();
        db.upsert_log(habit.id, day(5), LogStatus::Completed).unwrap();
        db.upsert_log(habit.id, day(3), LogStatus::Completed).unwrap();

        let dates: Vec<NaiveDate> = db.list_logs().unwrap().iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![day(5), day(3), day(1)]);
    }

    #[test]
    fn deleting_habit_cascades_to_logs() {
        let db = Database::open_memory().unwrap();
        let keep = db.insert_habit("Keep", HabitType::Good).unwrap();
        let gone = db.insert_habit("Gone", HabitType::Bad).unwrap();
        db.upsert_log(keep.id, day(1), LogStatus::Completed).unwrap();
        db.upsert_log(gone.id, day(1), LogStatus::Failed).unwrap();
        db.upsert_log(gone.id, day(2), LogStatus::Completed).unwrap();

        assert!(db.delete_habit(gone.id).unwrap());
        let logs = db.list_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].habit_id, keep.id);
    }

    #[test]
    fn delete_logs_on_only_touches_that_day() {
        let db = Database::open_memory().unwrap();
        let a = db.insert_habit("A", HabitType::Good).unwrap();
        let b = db.insert_habit("B", HabitType::Bad).unwrap();
        db.upsert_log(a.id, day(4), LogStatus::Completed).unwrap();
        db.upsert_log(b.id, day(4), LogStatus::Failed).unwrap();
        db.upsert_log(a.id, day(3), LogStatus::Completed).unwrap();

        assert_eq!(db.delete_logs_on(day(4)).unwrap(), 2);
        assert_eq!(db.list_logs().unwrap().len(), 1);
        assert_eq!(db.delete_logs_on(day(4)).unwrap(), 0);
    }

    #[test]
    fn task_completion_sets_and_clears_timestamp() {
        let db = Database::open_memory().unwrap();
        let task = db.insert_task("Write report").unwrap();
        assert_eq!(task.status, TaskStatus::Ongoing);
        assert!(task.completed_at.is_none());

        let now = Utc::now();
        let done = db
            .update_task_status(task.id, TaskStatus::Completed, now)
            .unwrap()
            .unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(done.completed_at.is_some());

        let reopened = db
            .update_task_status(task.id, TaskStatus::Ongoing, now)
            .unwrap()
            .unwrap();
        assert!(reopened.completed_at.is_none());
    }

    #[test]
    fn delete_tasks_with_status() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        let a = db.insert_task("a").unwrap();
        let b = db.insert_task("b").unwrap();
        db.insert_task("c").unwrap();
        db.update_task_status(a.id, TaskStatus::Completed, now).unwrap();
        db.update_task_status(b.id, TaskStatus::Completed, now).unwrap();

        assert_eq!(db.delete_tasks_with_status(TaskStatus::Completed).unwrap(), 2);
        let remaining = db.list_tasks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "c");
    }

    #[test]
    fn focus_sessions_insert_and_clear() {
        let db = Database::open_memory().unwrap();
        db.insert_focus_session(25, "Draft chapter", true).unwrap();
        db.insert_focus_session(50, "Refactor parser", false).unwrap();

        let sessions = db.list_focus_sessions().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].goal, "Refactor parser");
        assert!(!sessions[0].achieved);

        assert_eq!(db.delete_all_focus_sessions().unwrap(), 2);
        assert!(db.list_focus_sessions().unwrap().is_empty());
    }

    #[test]
    fn deleting_question_cascades_to_principles() {
        let db = Database::open_memory().unwrap();
        let q1 = db
            .insert_question("How do I rest?", QuestionCategory::MentalHealth)
            .unwrap();
        let q2 = db
            .insert_question("How do I save?", QuestionCategory::Money)
            .unwrap();
        for (qid, title) in [(q1.id, "Sleep 8h"), (q1.id, "No screens"), (q2.id, "Pay self first")] {
            db.insert_principle(&NewPrinciple {
                question_id: qid,
                title: title.into(),
                description: None,
                examples: None,
            })
            .unwrap();
        }

        assert_eq!(db.list_principles(Some(q1.id)).unwrap().len(), 2);
        assert!(db.delete_question(q1.id).unwrap());
        let remaining = db.list_principles(None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].question_id, q2.id);
    }

    #[test]
    fn principle_update_keeps_status_when_absent() {
        let db = Database::open_memory().unwrap();
        let q = db
            .insert_question("How do I focus?", QuestionCategory::TimeManagement)
            .unwrap();
        let p = db
            .insert_principle(&NewPrinciple {
                question_id: q.id,
                title: "Single-task".into(),
                description: Some("One thing at a time".into()),
                examples: None,
            })
            .unwrap();

        let tested = db
            .update_principle(
                p.id,
                &PrincipleChanges {
                    title: "Single-task".into(),
                    description: Some("One thing at a time".into()),
                    examples: None,
                    status: Some(PrincipleStatus::Tested),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(tested.status, PrincipleStatus::Tested);

        let retitled = db
            .update_principle(
                p.id,
                &PrincipleChanges {
                    title: "Monotask".into(),
                    description: None,
                    examples: None,
                    status: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(retitled.title, "Monotask");
        assert_eq!(retitled.status, PrincipleStatus::Tested);
        assert!(retitled.description.is_none());
    }

    #[test]
    fn malformed_stored_date_fails_fast() {
        let db = Database::open_memory().unwrap();
        let habit = db.insert_habit("Run", HabitType::Good).unwrap();
        db.conn()
            .execute(
                "INSERT INTO habit_logs (habit_id, status, date, created_at)
                 VALUES (?1, 'completed', '06/03/2024', ?2)",
                params![habit.id, Utc::now().to_rfc3339()],
            )
            .unwrap();

        assert!(matches!(
            db.list_logs(),
            Err(rusqlite::Error::FromSqlConversionFailure(3, _, _))
        ));
    }

    #[test]
    fn open_on_disk_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habitroom.db");
        {
            let db = Database::open(&path).unwrap();
            db.insert_task("persist me").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.list_tasks().unwrap().len(), 1);
    }
}
