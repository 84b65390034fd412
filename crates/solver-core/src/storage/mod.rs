mod config;

pub use config::{Config, NotificationsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/solver-society[-dev]/` based on SOLVER_ENV.
///
/// Set SOLVER_ENV=dev to use the development directory, or
/// SOLVER_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SOLVER_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::NoDataDir("home directory not found".into()))?
                .join(".config");

            let env = std::env::var("SOLVER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("solver-society-dev")
            } else {
                base_dir.join("solver-society")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoDataDir(e.to_string()))?;
    Ok(dir)
}
