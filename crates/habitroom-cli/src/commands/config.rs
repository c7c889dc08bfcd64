use clap::Subcommand;
use habitroom_core::error::Result;
use habitroom_core::{Config, ConfigError};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dotted key, e.g. "stats.recent_window_days"
    Get { key: String },
    /// Change one value and save
    Set { key: String, value: String },
    /// Restore one value to its default (clears optional values) and save
    Unset { key: String },
    /// Print the whole configuration
    List,
    /// Overwrite the config file with defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            if !config.has_key(&key) {
                return Err(ConfigError::UnknownKey(key).into());
            }
            println!("{}", config.get(&key).unwrap_or_default());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "config updated");
            println!("ok");
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load()?;
            config.unset(&key)?;
            config.save()?;
            tracing::info!(%key, "config value reset");
            println!("ok");
        }
        ConfigAction::List => print_json(&Config::load()?)?,
        ConfigAction::Reset => {
            let path = Config::path()?;
            Config::default().save_to(&path)?;
            print_json(&json!({ "reset": path }))?;
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
