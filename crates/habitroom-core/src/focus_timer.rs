//! Countdown for a single focus session.
//!
//! A wall-clock state machine with no internal thread: the caller passes
//! the current instant to every command and calls [`FocusTimer::tick`]
//! periodically.
//!
//! ```text
//! Idle -> Running <-> Paused -> Finished
//! ```
//!
//! A timer reaches `Finished` either by running out or by [`FocusTimer::stop`].
//! Only then can the session be recorded, with the planned duration and the
//! caller's answer to whether the goal was achieved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a session when none is given.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusTimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    goal: String,
    duration_minutes: u32,
    state: FocusTimerState,
    remaining_ms: u64,
    /// Instant the remaining time was last brought up to date.
    #[serde(default)]
    last_tick: Option<DateTime<Utc>>,
}

impl FocusTimer {
    /// A stopped timer for `goal` lasting `duration_minutes`.
    ///
    /// # Errors
    /// Rejects a blank goal or a zero duration, like recording a session.
    pub fn new(goal: &str, duration_minutes: u32) -> Result<Self, ValidationError> {
        if goal.trim().is_empty() || duration_minutes == 0 {
            return Err(ValidationError::MissingFields("Duration and goal are required"));
        }
        Ok(Self {
            goal: goal.to_string(),
            duration_minutes,
            state: FocusTimerState::Idle,
            remaining_ms: u64::from(duration_minutes) * 60_000,
            last_tick: None,
        })
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn state(&self) -> FocusTimerState {
        self.state
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_finished(&self) -> bool {
        self.state == FocusTimerState::Finished
    }

    /// Remaining time as `MM:SS`, seconds rounded up.
    pub fn remaining_display(&self) -> String {
        let secs = self.remaining_ms.div_ceil(1000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Elapsed share of the session, 0..=100.
    pub fn progress_pct(&self) -> u32 {
        let total = u64::from(self.duration_minutes) * 60_000;
        ((total - self.remaining_ms) * 100 / total) as u32
    }

    /// Start or resume counting down. Returns whether the state changed.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            FocusTimerState::Idle | FocusTimerState::Paused => {
                self.state = FocusTimerState::Running;
                self.last_tick = Some(now);
                true
            }
            FocusTimerState::Running | FocusTimerState::Finished => false,
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != FocusTimerState::Running {
            return false;
        }
        self.flush_elapsed(now);
        if self.remaining_ms == 0 {
            self.finish();
        } else {
            self.state = FocusTimerState::Paused;
            self.last_tick = None;
        }
        true
    }

    /// End the session early.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        if self.state == FocusTimerState::Running {
            self.flush_elapsed(now);
        }
        self.finish();
    }

    /// Bring the countdown up to `now`. Returns `true` exactly once, on the
    /// tick that runs the timer out.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != FocusTimerState::Running {
            return false;
        }
        self.flush_elapsed(now);
        if self.remaining_ms == 0 {
            self.finish();
            return true;
        }
        false
    }

    fn finish(&mut self) {
        self.state = FocusTimerState::Finished;
        self.last_tick = None;
    }

    fn flush_elapsed(&mut self, now: DateTime<Utc>) {
        if let Some(last) = self.last_tick {
            let elapsed = u64::try_from((now - last).num_milliseconds()).unwrap_or(0);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn rejects_blank_goal_and_zero_duration() {
        assert!(FocusTimer::new("  ", 25).is_err());
        assert!(FocusTimer::new("Write", 0).is_err());
    }

    #[test]
    fn counts_down_to_finished() {
        let mut timer = FocusTimer::new("Write", 1).unwrap();
        assert_eq!(timer.remaining_display(), "01:00");
        assert!(timer.start(t0()));

        assert!(!timer.tick(t0() + Duration::seconds(20)));
        assert_eq!(timer.remaining_display(), "00:40");
        assert_eq!(timer.progress_pct(), 33);

        assert!(timer.tick(t0() + Duration::seconds(61)));
        assert!(timer.is_finished());
        assert_eq!(timer.remaining_ms(), 0);
        assert!(!timer.tick(t0() + Duration::seconds(62)));
    }

    #[test]
    fn paused_time_does_not_count() {
        let mut timer = FocusTimer::new("Read", 1).unwrap();
        timer.start(t0());
        assert!(timer.pause(t0() + Duration::seconds(10)));
        assert_eq!(timer.state(), FocusTimerState::Paused);

        assert!(!timer.tick(t0() + Duration::seconds(500)));
        assert!(timer.start(t0() + Duration::seconds(500)));
        timer.tick(t0() + Duration::seconds(510));
        assert_eq!(timer.remaining_ms(), 40_000);
    }

    #[test]
    fn stop_finishes_early() {
        let mut timer = FocusTimer::new("Plan", DEFAULT_FOCUS_MINUTES).unwrap();
        timer.start(t0());
        timer.stop(t0() + Duration::minutes(5));
        assert!(timer.is_finished());
        assert_eq!(timer.remaining_ms(), 20 * 60_000);
        assert!(!timer.start(t0() + Duration::minutes(6)));
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut timer = FocusTimer::new("Plan", 1).unwrap();
        timer.start(t0());
        timer.tick(t0() - Duration::seconds(30));
        assert_eq!(timer.remaining_ms(), 60_000);
    }
}
