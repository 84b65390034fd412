//! Read and edit the TOML config file.
//!
//! Edits go through [`Config::set`] for parsing and [`Config::validate`] for
//! range checks; nothing is written unless both pass.

use clap::Subcommand;
use solver_core::{Config, ConfigError};
use tracing::debug;

use super::CommandResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (dot-separated key, e.g. notifications.window_secs)
    Get { key: String },
    /// Change one setting and save the file
    Set { key: String, value: String },
    /// Print every setting as JSON
    List,
    /// Restore defaults; this also forgets the remembered agent
    Reset,
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Get { key } => show(&key),
        ConfigAction::Set { key, value } => update(&key, &value),
        ConfigAction::List => dump(),
        ConfigAction::Reset => reset(),
    }
}

fn show(key: &str) -> CommandResult {
    let value = Config::load()?
        .get(key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    println!("{value}");
    Ok(())
}

fn update(key: &str, value: &str) -> CommandResult {
    let mut edited = Config::load()?;
    edited.set(key, value)?;
    edited.validate()?;
    edited.save()?;
    debug!(key, "config saved");
    println!("{key} = {}", edited.get(key).unwrap_or_default());
    Ok(())
}

fn dump() -> CommandResult {
    println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
    Ok(())
}

fn reset() -> CommandResult {
    let path = Config::path()?;
    Config::default().save_to(&path)?;
    debug!(path = %path.display(), "config reset");
    println!("restored defaults in {}", path.display());
    Ok(())
}
