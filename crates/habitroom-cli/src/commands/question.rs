//! Life question commands.

use std::path::Path;

use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::tracker::{CreateQuestion, QuestionFilter, UpdateQuestion};
use serde_json::json;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum QuestionAction {
    /// List questions
    List {
        /// Exact category label, e.g. "Money & Finance"
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one question
    Get {
        /// Question ID
        id: i64,
    },
    /// Create a question
    Create {
        /// Question title
        title: String,
        #[arg(long)]
        category: String,
    },
    /// Update a question
    Update {
        /// Question ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a question and its principles
    Delete {
        /// Question ID
        id: i64,
    },
}

pub fn run(action: QuestionAction, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;

    match action {
        QuestionAction::List { category, search } => {
            let questions = tracker.list_questions(&QuestionFilter { category, search })?;
            print_json(&questions)?;
        }
        QuestionAction::Get { id } => print_json(&tracker.get_question(id)?)?,
        QuestionAction::Create { title, category } => {
            let question = tracker.create_question(CreateQuestion {
                title: Some(title),
                category: Some(category),
            })?;
            print_json(&question)?;
        }
        QuestionAction::Update {
            id,
            title,
            category,
        } => {
            let question = tracker.update_question(UpdateQuestion {
                id: Some(id),
                title,
                category,
            })?;
            print_json(&question)?;
        }
        QuestionAction::Delete { id } => {
            tracker.delete_question(id)?;
            print_json(&json!({ "deleted": id }))?;
        }
    }
    Ok(())
}
