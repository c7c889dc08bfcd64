//! Dashboard statistics.
//!
//! Aggregates over focus sessions, tasks and principles, combined with the
//! habit figures from [`crate::streak`] into a single [`Dashboard`].

mod overview;

pub use overview::{
    is_recent, Dashboard, DashboardInput, FocusOverview, HabitSummary, PrincipleOverview,
    TaskOverview,
};
