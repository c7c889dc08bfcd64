use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use habitroom_core::error::Result;
use habitroom_core::local_today;

use super::{open_tracker, print_json};

/// Reference instant for the recent-activity figures: the last second of
/// `date` (UTC) when one is given, otherwise the current time.
fn reference_now(date: Option<NaiveDate>) -> DateTime<Utc> {
    match date {
        Some(date) => {
            date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1)
        }
        None => Utc::now(),
    }
}

pub fn run(date: Option<NaiveDate>, db: Option<&Path>) -> Result<()> {
    let tracker = open_tracker(db)?;
    let today = date.unwrap_or_else(local_today);
    let dashboard = tracker.dashboard(today, reference_now(date))?;
    print_json(&dashboard)
}
