pub mod config;
pub mod dashboard;
pub mod focus;
pub mod habit;
pub mod principle;
pub mod question;
pub mod task;

use std::path::Path;

use habitroom_core::error::Result;
use habitroom_core::{Config, Database, Tracker};
use serde::Serialize;

/// Open the tracker on `db`, or on the configured database when absent.
///
/// With an explicit `db`, an unreadable config only costs the settings:
/// defaults are used and the failure is logged.
pub fn open_tracker(db: Option<&Path>) -> Result<Tracker> {
    let (config, path) = match db {
        Some(path) => {
            let config = Config::load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "config unavailable, using defaults");
                Config::default()
            });
            (config, path.to_path_buf())
        }
        None => {
            let config = Config::load()?;
            let path = config.database_path()?;
            (config, path)
        }
    };
    tracing::debug!(path = %path.display(), "opening database");
    let database = Database::open(&path)?;
    Ok(Tracker::with_config(database, &config))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
