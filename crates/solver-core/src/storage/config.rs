//! TOML-based application configuration.
//!
//! Stores:
//! - The remote store endpoint (`api_url`), which survives logout
//! - The remembered agent identity, when signed in with an Agent ID
//! - Notification display window
//! - Default log level
//!
//! Configuration is stored at `~/.config/solver-society/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Shortest and longest notification windows, in seconds.
pub const NOTIFICATION_WINDOW_BOUNDS: (u64, u64) = (4, 6);

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Seconds a notification stays visible.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/solver-society/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote routine store.
    #[serde(default)]
    pub api_url: String,
    /// Agent identity remembered across restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Default tracing filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_window_secs() -> u64 {
    NOTIFICATION_WINDOW_BOUNDS.1
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

impl NotificationsConfig {
    /// Window clamped into the supported bounds.
    pub fn window(&self) -> std::time::Duration {
        let (min, max) = NOTIFICATION_WINDOW_BOUNDS;
        std::time::Duration::from_secs(self.window_secs.clamp(min, max))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            agent_id: None,
            log_level: default_log_level(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default on-disk location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        // Optional fields are skipped when absent; expose them for editing.
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        if let Some(obj) = json.as_object_mut() {
            obj.entry("agent_id").or_insert(serde_json::Value::Null);
        }
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Check values that parse but are out of range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a notification window outside
    /// [`NOTIFICATION_WINDOW_BOUNDS`] or an endpoint that is not an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = NOTIFICATION_WINDOW_BOUNDS;
        if !(min..=max).contains(&self.notifications.window_secs) {
            return Err(ConfigError::InvalidValue {
                key: "notifications.window_secs".into(),
                message: format!("must be between {min} and {max} seconds"),
            });
        }

        let endpoint = self.api_url.trim();
        let is_http = endpoint.starts_with("http://") || endpoint.starts_with("https://");
        if !endpoint.is_empty() && !is_http {
            return Err(ConfigError::InvalidValue {
                key: "api_url".into(),
                message: format!("'{endpoint}' is not an http(s) URL"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(!toml_str.contains("agent_id"));
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url, "");
        assert_eq!(cfg.agent_id, None);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.notifications.window_secs, 6);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str(r#"api_url = "https://x/api""#).unwrap();
        assert_eq!(cfg.api_url, "https://x/api");
        assert_eq!(cfg.notifications.window_secs, 6);
    }

    #[test]
    fn notification_window_is_clamped() {
        let mut cfg = NotificationsConfig { window_secs: 1 };
        assert_eq!(cfg.window().as_secs(), 4);
        cfg.window_secs = 30;
        assert_eq!(cfg.window().as_secs(), 6);
        cfg.window_secs = 5;
        assert_eq!(cfg.window().as_secs(), 5);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.window_secs").as_deref(), Some("6"));
        assert_eq!(cfg.get("log_level").as_deref(), Some("warn"));
        assert!(cfg.get("notifications.missing_key").is_none());
    }

    #[test]
    fn set_updates_string_and_number() {
        let mut cfg = Config::default();
        cfg.set("api_url", "https://example.com/prod").unwrap();
        cfg.set("notifications.window_secs", "4").unwrap();
        assert_eq!(cfg.api_url, "https://example.com/prod");
        assert_eq!(cfg.notifications.window_secs, 4);
    }

    #[test]
    fn set_optional_agent_id() {
        let mut cfg = Config::default();
        cfg.set("agent_id", "Solver001").unwrap();
        assert_eq!(cfg.agent_id.as_deref(), Some("Solver001"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.set("ui.dark_mode", "true");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_number() {
        let mut cfg = Config::default();
        let result = cfg.set("notifications.window_secs", "soon");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn validate_rejects_window_outside_bounds() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        cfg.set("notifications.window_secs", "10").unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "notifications.window_secs"
        ));

        cfg.notifications.window_secs = 4;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let mut cfg = Config::default();
        cfg.api_url = "ftp://x/api".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "api_url"
        ));
        cfg.api_url = "https://x/api".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.api_url = "https://x/api/routines".into();
        cfg.agent_id = Some("Solver001".into());
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
