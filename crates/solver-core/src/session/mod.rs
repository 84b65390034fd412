//! Session store: who is signed in and which endpoint to talk to.
//!
//! The endpoint is persisted immediately on every change and survives
//! logout. The identity lasts for the session only, except for agent
//! identities which are remembered until an explicit logout.
//!
//! Identity changes are published on a broadcast stream so the owner of the
//! routine aggregate can react (fetch on sign-in, clear on sign-out) without
//! the session knowing about it.

pub mod persistence;

pub use persistence::{
    ConfigFilePersistence, MemoryPersistence, PersistedSession, SessionPersistence,
};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Environment fallback when no endpoint has been saved yet.
pub const API_URL_ENV: &str = "SOLVER_API_URL";

const EVENT_CAPACITY: usize = 16;

/// How the current identity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Free-text agent identifier typed by the user; remembered locally.
    Agent,
    /// Email-like id from a federated sign-in; the provider keeps its own
    /// session, so nothing is written locally.
    Federated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub source: IdentitySource,
}

/// Identity transitions, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    Present(String),
    Absent,
}

/// Snapshot of a ready session taken when a request is issued. A response is
/// only applied if the session still matches the ticket it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    pub endpoint: String,
    pub identity: String,
    pub epoch: u64,
}

pub struct Session {
    endpoint: String,
    identity: Option<Identity>,
    /// Bumped on every identity change.
    epoch: u64,
    persistence: Box<dyn SessionPersistence>,
    events: broadcast::Sender<IdentityEvent>,
}

impl Session {
    /// Restore from `persistence`, falling back to `SOLVER_API_URL` for the
    /// endpoint.
    pub fn open(persistence: Box<dyn SessionPersistence>) -> Self {
        let fallback = std::env::var(API_URL_ENV).ok();
        Self::open_with_fallback(persistence, fallback)
    }

    pub fn open_with_fallback(
        persistence: Box<dyn SessionPersistence>,
        fallback_endpoint: Option<String>,
    ) -> Self {
        let persisted = persistence.load().unwrap_or_else(|e| {
            warn!("could not load session state, starting empty: {e}");
            PersistedSession::default()
        });

        let endpoint = if persisted.endpoint.trim().is_empty() {
            fallback_endpoint.unwrap_or_default().trim().to_string()
        } else {
            persisted.endpoint.trim().to_string()
        };

        let identity = persisted.agent_id.map(|id| Identity {
            id,
            source: IdentitySource::Agent,
        });

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        debug!(
            endpoint = %endpoint,
            restored_identity = identity.is_some(),
            "session opened"
        );

        Self {
            endpoint,
            identity,
            epoch: 0,
            persistence,
            events,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.id.as_str())
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Store and persist the endpoint. A failed write is logged; the new
    /// value is used for the rest of the session regardless.
    pub fn set_endpoint(&mut self, url: &str) {
        self.endpoint = url.trim().to_string();
        if let Err(e) = self.persistence.save_endpoint(&self.endpoint) {
            warn!("endpoint not persisted, keeping it for this session only: {e}");
        }
        info!(endpoint = %self.endpoint, "endpoint updated");
    }

    /// Sign in as `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyIdentity`] if `id` is blank.
    pub fn set_identity(&mut self, id: &str, source: IdentitySource) -> Result<(), AuthError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AuthError::EmptyIdentity);
        }

        if source == IdentitySource::Agent {
            if let Err(e) = self.persistence.save_agent_id(Some(id)) {
                warn!("agent identity not persisted: {e}");
            }
        }

        self.identity = Some(Identity {
            id: id.to_string(),
            source,
        });
        self.epoch += 1;
        info!(source = ?source, epoch = self.epoch, "identity set");
        let _ = self.events.send(IdentityEvent::Present(id.to_string()));
        Ok(())
    }

    /// Sign out. Leaves the endpoint untouched.
    pub fn clear_identity(&mut self) {
        let Some(previous) = self.identity.take() else {
            return;
        };

        if previous.source == IdentitySource::Agent {
            if let Err(e) = self.persistence.save_agent_id(None) {
                warn!("remembered agent identity not removed: {e}");
            }
        }

        self.epoch += 1;
        info!(epoch = self.epoch, "identity cleared");
        let _ = self.events.send(IdentityEvent::Absent);
    }

    pub fn is_ready(&self) -> bool {
        !self.endpoint.is_empty() && self.identity.as_ref().is_some_and(|i| !i.id.is_empty())
    }

    /// Ticket for a request, or `None` if the session is not ready.
    pub fn ticket(&self) -> Option<SessionTicket> {
        if !self.is_ready() {
            return None;
        }
        let identity = self.identity.as_ref()?;
        Some(SessionTicket {
            endpoint: self.endpoint.clone(),
            identity: identity.id.clone(),
            epoch: self.epoch,
        })
    }

    /// Whether a response issued under `ticket` may still be applied.
    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        self.epoch == ticket.epoch && self.user_id() == Some(ticket.identity.as_str())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.events.subscribe()
    }
}
