//! Principle commands.

use std::path::Path;

use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::tracker::{CreatePrinciple, UpdatePrinciple};
use serde_json::json;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum PrincipleAction {
    /// List principles, newest first
    List {
        /// Only principles answering this question
        #[arg(long)]
        question: Option<i64>,
    },
    /// Show a principle with its question
    Get {
        /// Principle ID
        id: i64,
    },
    /// Create a principle under a question
    Create {
        /// Question ID
        #[arg(long)]
        question: i64,
        /// Principle title
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        examples: Option<String>,
    },
    /// Update a principle; omitted description/examples are cleared
    Update {
        /// Principle ID
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        examples: Option<String>,
        /// testing or tested (kept when omitted)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a principle
    Delete {
        /// Principle ID
        id: i64,
    },
}

pub fn run(action: PrincipleAction, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;

    match action {
        PrincipleAction::List { question } => print_json(&tracker.list_principles(question)?)?,
        PrincipleAction::Get { id } => print_json(&tracker.principle_detail(id)?)?,
        PrincipleAction::Create {
            question,
            title,
            description,
            examples,
        } => {
            let principle = tracker.create_principle(CreatePrinciple {
                question_id: Some(question),
                title: Some(title),
                description,
                examples,
            })?;
            print_json(&principle)?;
        }
        PrincipleAction::Update {
            id,
            title,
            description,
            examples,
            status,
        } => {
            let principle = tracker.update_principle(UpdatePrinciple {
                id: Some(id),
                title: Some(title),
                description,
                examples,
                status,
            })?;
            print_json(&principle)?;
        }
        PrincipleAction::Delete { id } => {
            tracker.delete_principle(id)?;
            print_json(&json!({ "deleted": id }))?;
        }
    }
    Ok(())
}
