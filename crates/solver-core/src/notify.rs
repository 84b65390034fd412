//! Single-slot transient notifications.
//!
//! Publishing overwrites whatever is showing. Each notification gets its own
//! id and its own clearing timer; a timer only clears the slot if the slot
//! still holds the notification it was started for.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip)]
    pub expires_at: Instant,
}

type Slot = watch::Sender<Option<Notification>>;

pub struct NotificationChannel {
    window: Duration,
    next_id: AtomicU64,
    slot: Arc<Slot>,
}

impl NotificationChannel {
    pub fn new(window: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            window,
            next_id: AtomicU64::new(0),
            slot: Arc::new(slot),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the current notification and schedule its removal.
    ///
    /// Outside a tokio runtime no timer is spawned; the notification still
    /// stops being [`current`](Self::current) once its window has passed.
    pub fn publish(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let expires_at = Instant::now() + self.window;
        let message = message.into();
        debug!(id, ?kind, %message, "notification published");

        self.slot.send_replace(Some(Notification {
            id,
            kind,
            message,
            expires_at,
        }));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let slot = Arc::clone(&self.slot);
            handle.spawn(async move {
                tokio::time::sleep_until(expires_at).await;
                if clear_if_current(&slot, id) {
                    debug!(id, "notification expired");
                }
            });
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.publish(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.publish(NotificationKind::Error, message)
    }

    /// The pending notification, if any and not yet expired.
    pub fn current(&self) -> Option<Notification> {
        let now = Instant::now();
        self.slot
            .borrow()
            .as_ref()
            .filter(|n| n.expires_at > now)
            .cloned()
    }

    /// Remove notification `id` if it is still the one showing.
    pub fn dismiss(&self, id: u64) -> bool {
        clear_if_current(&self.slot, id)
    }

    /// Observe every change of the slot, including timed clears.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}

fn clear_if_current(slot: &Slot, id: u64) -> bool {
    slot.send_if_modified(|current| {
        if current.as_ref().is_some_and(|n| n.id == id) {
            *current = None;
            true
        } else {
            false
        }
    })
}
