//! Task management commands for CLI.

use std::path::Path;

use chrono::Utc;
use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::tracker::{CreateTask, UpdateTaskStatus};
use serde_json::json;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, newest first
    List,
    /// Create a new task
    Create {
        /// Task title
        title: String,
    },
    /// Set a task's status
    Status {
        /// Task ID
        id: i64,
        /// ongoing, completed or cancelled
        status: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
    /// Delete all completed tasks
    ClearCompleted,
}

pub fn run(action: TaskAction, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;

    match action {
        TaskAction::List => print_json(&tracker.list_tasks()?)?,
        TaskAction::Create { title } => {
            let task = tracker.create_task(CreateTask { title: Some(title) })?;
            print_json(&task)?;
        }
        TaskAction::Status { id, status } => {
            let task = tracker.set_task_status(
                UpdateTaskStatus {
                    id: Some(id),
                    status: Some(status),
                },
                Utc::now(),
            )?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            tracker.delete_task(id)?;
            print_json(&json!({ "deleted": id }))?;
        }
        TaskAction::ClearCompleted => {
            let removed = tracker.clear_completed_tasks()?;
            print_json(&json!({ "removed": removed }))?;
        }
    }
    Ok(())
}
