use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::tracker::RecordFocusSession;
use habitroom_core::{FocusTimer, FocusTimerState, DEFAULT_FOCUS_MINUTES};
use serde_json::json;

use super::{open_tracker, print_json};

#[derive(Subcommand)]
pub enum FocusAction {
    /// List focus sessions, newest first
    List,
    /// Record a finished focus session
    Record {
        /// Session length in minutes
        #[arg(long)]
        duration: u32,
        /// What the session was for
        #[arg(long)]
        goal: String,
        /// Whether the goal was achieved
        #[arg(long)]
        achieved: bool,
    },
    /// Count a session down, then record it.
    ///
    /// While running, enter "p" to pause or resume and "s" to stop early.
    Start {
        /// What the session is for
        #[arg(long)]
        goal: String,
        /// Session length in minutes
        #[arg(long, default_value_t = DEFAULT_FOCUS_MINUTES)]
        duration: u32,
        /// Record the goal as achieved without asking
        #[arg(long, conflicts_with = "missed")]
        achieved: bool,
        /// Record the goal as missed without asking
        #[arg(long)]
        missed: bool,
    },
    /// Delete every focus session
    Clear,
}

pub fn run(action: FocusAction, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;

    match action {
        FocusAction::List => print_json(&tracker.list_focus_sessions()?)?,
        FocusAction::Record {
            duration,
            goal,
            achieved,
        } => {
            let session = tracker.record_focus_session(RecordFocusSession {
                duration_minutes: Some(duration),
                goal: Some(goal),
                achieved: Some(achieved),
            })?;
            print_json(&session)?;
        }
        FocusAction::Start {
            goal,
            duration,
            achieved,
            missed,
        } => {
            let mut timer = FocusTimer::new(&goal, duration)?;
            let input = spawn_line_reader();
            run_countdown(&mut timer, &input);

            let achieved = match (achieved, missed) {
                (true, _) => true,
                (_, true) => false,
                _ => ask(&input, "Goal achieved? [y/N]").unwrap_or(false),
            };
            let session = tracker.complete_focus_timer(&timer, achieved)?;
            tracing::info!(id = session.id, achieved, "focus session recorded");
            print_json(&session)?;
        }
        FocusAction::Clear => {
            let removed = tracker.clear_focus_sessions()?;
            print_json(&json!({ "removed": removed }))?;
        }
    }
    Ok(())
}

/// Forward stdin lines over a channel; the sender drops at end of input.
fn spawn_line_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Tick once a second until the timer finishes, reacting to typed commands.
fn run_countdown(timer: &mut FocusTimer, input: &Receiver<String>) {
    timer.start(Utc::now());
    let mut input_open = true;
    while !timer.is_finished() {
        show(timer);
        let line = if input_open {
            match input.recv_timeout(Duration::from_secs(1)) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    input_open = false;
                    None
                }
            }
        } else {
            std::thread::sleep(Duration::from_secs(1));
            None
        };

        match line.as_deref().map(str::trim) {
            Some("p") => {
                if timer.state() == FocusTimerState::Paused {
                    timer.start(Utc::now());
                } else {
                    timer.pause(Utc::now());
                }
            }
            Some("s") => {
                if ask(input, "Stop the session? [y/N]").unwrap_or(false) {
                    timer.stop(Utc::now());
                }
            }
            _ => {}
        }
        timer.tick(Utc::now());
    }
    show(timer);
    eprintln!();
}

fn show(timer: &FocusTimer) {
    let paused = if timer.state() == FocusTimerState::Paused {
        " (paused)"
    } else {
        ""
    };
    eprint!(
        "\r{} {:>3}% {}{}",
        timer.remaining_display(),
        timer.progress_pct(),
        timer.goal(),
        paused
    );
    let _ = std::io::stderr().flush();
}

/// Prompt on stderr and wait for a yes/no line. `None` once input is closed.
fn ask(input: &Receiver<String>, prompt: &str) -> Option<bool> {
    eprint!("\n{prompt} ");
    let _ = std::io::stderr().flush();
    input.recv().ok().map(|line| parse_answer(&line))
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        action: FocusAction,
    }

    #[test]
    fn answers() {
        assert!(parse_answer("y"));
        assert!(parse_answer(" YES \n"));
        assert!(!parse_answer(""));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("maybe"));
    }

    #[test]
    fn start_defaults_to_standard_length() {
        let cli = TestCli::try_parse_from(["focus", "start", "--goal", "Write"]).unwrap();
        match cli.action {
            FocusAction::Start {
                duration,
                achieved,
                missed,
                ..
            } => {
                assert_eq!(duration, DEFAULT_FOCUS_MINUTES);
                assert!(!achieved && !missed);
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn start_rejects_both_outcomes() {
        let parsed = TestCli::try_parse_from([
            "focus", "start", "--goal", "Write", "--achieved", "--missed",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn countdown_with_closed_input_runs_out() {
        let mut timer = FocusTimer::new("Write", 1).unwrap();
        // A finished timer never enters the loop.
        timer.start(Utc::now());
        timer.stop(Utc::now());
        let (_tx, rx) = mpsc::channel::<String>();
        run_countdown(&mut timer, &rx);
        assert!(timer.is_finished());
    }
}
