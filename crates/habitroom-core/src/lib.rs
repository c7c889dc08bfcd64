//! # Habitroom Core Library
//!
//! This library provides the core logic for Habitroom, a personal tracker for
//! good and bad habits, tasks, focus sessions and life principles. All
//! operations are available through the standalone `habitroom` CLI; any
//! other presenter is a thin layer over the same [`Tracker`].
//!
//! ## Architecture
//!
//! - **Records**: closed enums and plain structs for every stored entity
//! - **Streak engine**: pure functions computing streaks, success rates and
//!   today's progress from habit logs and an explicit "today"
//! - **Storage**: SQLite record store and TOML-based configuration
//! - **Focus timer**: wall-clock countdown for a focus session, recorded
//!   once it finishes
//! - **Tracker**: validates loosely-typed requests and maps failures onto
//!   the 400/404/500 error taxonomy
//!
//! ## Key Components
//!
//! - [`Tracker`]: validated operations over every resource
//! - [`Database`]: record persistence
//! - [`Config`]: application configuration management
//! - [`Dashboard`]: aggregate overview across all resources

pub mod error;
pub mod focus_timer;
pub mod records;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use error::{ConfigError, CoreError, DatabaseError, ErrorResponse, ValidationError};
pub use focus_timer::{FocusTimer, FocusTimerState, DEFAULT_FOCUS_MINUTES};
pub use records::{
    FocusSession, Habit, HabitLog, HabitType, LogStatus, Principle, PrincipleStatus, Question,
    QuestionCategory, Task, TaskStatus,
};
pub use stats::{Dashboard, HabitSummary};
pub use storage::{Config, Database};
pub use streak::{CalendarCell, HabitStats, TodaySnapshot};
pub use tracker::{local_today, PrincipleDetail, ToggleOutcome, Tracker};
