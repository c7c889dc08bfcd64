use chrono::{Duration, NaiveDate};
use habitroom_core::streak::{best_streak, current_streak, percentage, success_rate};
use habitroom_core::{HabitType, LogStatus};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// One log per day, at offsets from `base()` within a 60-day window.
fn history() -> impl Strategy<Value = Vec<(NaiveDate, LogStatus)>> {
    prop::collection::btree_map(0i64..60, any::<bool>(), 0..40).prop_map(|days| {
        days.into_iter()
            .map(|(offset, done)| {
                let status = if done {
                    LogStatus::Completed
                } else {
                    LogStatus::Failed
                };
                (base() + Duration::days(offset), status)
            })
            .collect()
    })
}

fn habit_type() -> impl Strategy<Value = HabitType> {
    prop_oneof![Just(HabitType::Good), Just(HabitType::Bad)]
}

#[test]
fn test_percentage_rounds_half_up() {
    assert_eq!(percentage(1, 8), 13);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);
    assert_eq!(percentage(0, 0), 0);
}

proptest! {
    #[test]
    fn prop_success_rate_is_a_percentage(logs in history(), kind in habit_type()) {
        prop_assert!(success_rate(kind, &logs) <= 100);
    }

    #[test]
    fn prop_best_streak_bounds_current_streak(
        logs in history(),
        kind in habit_type(),
        today_offset in 0i64..62,
    ) {
        let today = base() + Duration::days(today_offset);
        let current = current_streak(&logs, today);
        let best = best_streak(kind, &logs);
        prop_assert!(best >= current);
        prop_assert!(best as usize <= logs.len());
    }

    #[test]
    fn prop_order_of_logs_does_not_matter(
        logs in history(),
        kind in habit_type(),
        today_offset in 0i64..62,
    ) {
        let today = base() + Duration::days(today_offset);
        let mut reversed = logs.clone();
        reversed.reverse();

        prop_assert_eq!(current_streak(&logs, today), current_streak(&reversed, today));
        prop_assert_eq!(best_streak(kind, &logs), best_streak(kind, &reversed));
        prop_assert_eq!(success_rate(kind, &logs), success_rate(kind, &reversed));
    }

    #[test]
    fn prop_good_rate_counts_completed_days(logs in history()) {
        let completed = logs
            .iter()
            .filter(|(_, status)| *status == LogStatus::Completed)
            .count();
        prop_assert_eq!(
            success_rate(HabitType::Good, &logs),
            percentage(completed, logs.len())
        );
    }

    #[test]
    fn prop_streak_is_zero_without_a_log_today(logs in history()) {
        let today = base() + Duration::days(61);
        prop_assert_eq!(current_streak(&logs, today), 0);
    }
}
