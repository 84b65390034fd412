//! Where session state goes between runs.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::ConfigError;
use crate::storage::Config;

/// Session state that outlives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub endpoint: String,
    pub agent_id: Option<String>,
}

/// Backing store for [`super::Session`]. Writes are synchronous; the session
/// treats failures as non-fatal.
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Result<PersistedSession, ConfigError>;

    fn save_endpoint(&self, endpoint: &str) -> Result<(), ConfigError>;

    fn save_agent_id(&self, agent_id: Option<&str>) -> Result<(), ConfigError>;
}

/// Persists into the TOML config file.
pub struct ConfigFilePersistence {
    path: PathBuf,
}

impl ConfigFilePersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Use `~/.config/solver-society/config.toml`.
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::path()?))
    }

    fn update(&self, apply: impl FnOnce(&mut Config)) -> Result<(), ConfigError> {
        let mut config = Config::load_from(&self.path)?;
        apply(&mut config);
        config.save_to(&self.path)
    }
}

impl SessionPersistence for ConfigFilePersistence {
    fn load(&self) -> Result<PersistedSession, ConfigError> {
        let config = Config::load_from(&self.path)?;
        Ok(PersistedSession {
            endpoint: config.api_url,
            agent_id: config.agent_id.filter(|id| !id.trim().is_empty()),
        })
    }

    fn save_endpoint(&self, endpoint: &str) -> Result<(), ConfigError> {
        self.update(|config| config.api_url = endpoint.to_string())
    }

    fn save_agent_id(&self, agent_id: Option<&str>) -> Result<(), ConfigError> {
        self.update(|config| config.agent_id = agent_id.map(str::to_string))
    }
}

/// Keeps everything in memory. Useful for tests and ephemeral front ends.
#[derive(Default)]
pub struct MemoryPersistence {
    state: Mutex<PersistedSession>,
}

impl MemoryPersistence {
    pub fn new(initial: PersistedSession) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    pub fn snapshot(&self) -> PersistedSession {
        self.state
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<PersistedSession, ConfigError> {
        Ok(self.snapshot())
    }

    fn save_endpoint(&self, endpoint: &str) -> Result<(), ConfigError> {
        if let Ok(mut guard) = self.state.lock() {
            guard.endpoint = endpoint.to_string();
        }
        Ok(())
    }

    fn save_agent_id(&self, agent_id: Option<&str>) -> Result<(), ConfigError> {
        if let Ok(mut guard) = self.state.lock() {
            guard.agent_id = agent_id.map(str::to_string);
        }
        Ok(())
    }
}
