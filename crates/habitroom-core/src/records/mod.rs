//! Validated record types persisted by the store.
//!
//! Every `type`/`status`/`category` field is a closed enum. Strings coming
//! from callers or from the database are parsed with [`std::str::FromStr`]
//! and unknown values are rejected instead of passed through.

mod focus;
mod habit;
mod principle;
mod task;

pub use focus::FocusSession;
pub use habit::{Habit, HabitLog, HabitType, LogStatus, DATE_FORMAT};
pub use principle::{Principle, PrincipleStatus, Question, QuestionCategory};
pub use task::{Task, TaskStatus};
