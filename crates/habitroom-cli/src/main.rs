use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use habitroom_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitroom", version, about = "Habitroom habit and focus tracker")]
struct Cli {
    /// SQLite database to use instead of the configured one
    #[arg(long, global = true, env = "HABITROOM_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habits, daily logs and streaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus sessions
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Life questions
    Question {
        #[command(subcommand)]
        action: commands::question::QuestionAction,
    },
    /// Principles answering life questions
    Principle {
        #[command(subcommand)]
        action: commands::principle::PrincipleAction,
    },
    /// Overview across all records
    Dashboard {
        /// Day to treat as today; recent figures count up to its end
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing() {
    let level = Config::load()
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process exit code for an error status.
fn exit_code(status: u16) -> i32 {
    match status {
        400 => 2,
        404 => 3,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "habitroom", &mut std::io::stdout());
        return;
    }

    init_tracing();
    let db = cli.db.as_deref();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, db),
        Commands::Task { action } => commands::task::run(action, db),
        Commands::Focus { action } => commands::focus::run(action, db),
        Commands::Question { action } => commands::question::run(action, db),
        Commands::Principle { action } => commands::principle::run(action, db),
        Commands::Dashboard { date } => commands::dashboard::run(date, db),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        let (status, body) = e.to_response();
        match serde_json::to_string(&body) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {}", body.error),
        }
        std::process::exit(exit_code(status));
    }
}
