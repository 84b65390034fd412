//! Application controller.
//!
//! [`RoutineApp`] owns the session, the draft, the fetched aggregate and the
//! notification slot, and runs the user-level operations against them:
//! sign in/out, edit and submit a routine, refresh the dashboard.
//!
//! Every method takes `&self`, so fetches may overlap. Each fetch carries a
//! [`SessionTicket`]; a response whose ticket no longer matches the session
//! is dropped. Among current responses the last one to complete wins.

use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::aggregate::RoutineAggregate;
use crate::auth::IdentityProvider;
use crate::error::{AuthError, ConfigError, CoreError, Result};
use crate::notify::NotificationChannel;
use crate::routine::DraftEntry;
use crate::score::ScoreBreakdown;
use crate::session::{IdentityEvent, IdentitySource, Session, SessionTicket};
use crate::sync::SyncClient;

/// User-facing notification texts.
pub mod messages {
    pub const CONFIGURE_ENDPOINT: &str = "Please configure your API URL first.";
    pub const SUBMIT_FAILED: &str = "Submission failed.";
    pub const SUBMIT_SUCCEEDED: &str = "Routine logged via Optimization Engine.";
    pub const FETCH_FAILED: &str = "Failed to fetch data. Check API URL.";
    pub const REFRESH_SUCCEEDED: &str = "Data refreshed successfully";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Input,
    Dashboard,
}

/// Who asked for a fetch. Only manual refreshes announce success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The aggregate now holds `count` entries.
    Applied { count: usize },
    /// Session not ready; nothing was sent.
    Skipped,
    /// Identity changed while the request was in flight; response dropped.
    Stale,
}

/// A routine was stored. The follow-up fetch may still have failed.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub date: NaiveDate,
    pub refresh: Result<FetchOutcome>,
}

/// Identity is set. The fetch that follows sign-in may still have failed;
/// `fetch` is `None` if none was attempted.
#[derive(Debug)]
pub struct SignInOutcome {
    pub user_id: String,
    pub fetch: Option<Result<FetchOutcome>>,
}

/// Counts requests in flight for the lifetime of the guard.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RoutineApp {
    session: Mutex<Session>,
    identity_events: Mutex<broadcast::Receiver<IdentityEvent>>,
    client: SyncClient,
    aggregate: RoutineAggregate,
    notifications: NotificationChannel,
    draft: Mutex<DraftEntry>,
    view: Mutex<View>,
    in_flight: AtomicUsize,
}

impl RoutineApp {
    pub fn new(session: Session, client: SyncClient, notifications: NotificationChannel) -> Self {
        let identity_events = session.subscribe();
        Self {
            session: Mutex::new(session),
            identity_events: Mutex::new(identity_events),
            client,
            aggregate: RoutineAggregate::new(),
            notifications,
            draft: Mutex::new(DraftEntry::new()),
            view: Mutex::new(View::Input),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Fetch for an identity restored from the last run, if any.
    pub async fn start(&self) -> Option<Result<FetchOutcome>> {
        if lock(&self.session).identity().is_none() {
            return None;
        }
        Some(self.refresh(RefreshTrigger::Automatic).await)
    }

    pub fn endpoint(&self) -> String {
        lock(&self.session).endpoint().to_string()
    }

    pub fn user_id(&self) -> Option<String> {
        lock(&self.session).user_id().map(str::to_string)
    }

    pub fn identity_source(&self) -> Option<IdentitySource> {
        lock(&self.session).identity().map(|i| i.source)
    }

    pub fn set_endpoint(&self, url: &str) {
        lock(&self.session).set_endpoint(url);
    }

    pub fn aggregate(&self) -> &RoutineAggregate {
        &self.aggregate
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn view(&self) -> View {
        *lock(&self.view)
    }

    /// True while any fetch or submit is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Manual refresh is disabled while loading.
    pub fn can_refresh(&self) -> bool {
        !self.is_loading()
    }

    pub fn draft(&self) -> DraftEntry {
        lock(&self.draft).clone()
    }

    /// Edit the draft in place.
    pub fn edit_draft<R>(&self, edit: impl FnOnce(&mut DraftEntry) -> R) -> R {
        edit(&mut lock(&self.draft))
    }

    pub fn preview(&self) -> ScoreBreakdown {
        lock(&self.draft).breakdown()
    }

    /// Sign in through `provider`. Failures are published as an error
    /// notification and returned.
    pub async fn sign_in(
        &self,
        provider: &mut dyn IdentityProvider,
    ) -> Result<SignInOutcome, AuthError> {
        let source = provider.source();
        let signed_in = provider.sign_in().and_then(|id| {
            lock(&self.session).set_identity(&id, source)?;
            Ok(id.trim().to_string())
        });

        let user_id = match signed_in {
            Ok(user_id) => user_id,
            Err(e) => {
                warn!("sign-in via {} failed: {e}", provider.display_name());
                self.notifications.error(e.user_message());
                return Err(e);
            }
        };

        if source == IdentitySource::Federated {
            self.notifications
                .success(format!("Authenticated with {}", provider.display_name()));
        }
        let fetch = self.sync_identity().await;
        Ok(SignInOutcome { user_id, fetch })
    }

    pub async fn logout(&self) {
        lock(&self.session).clear_identity();
        *lock(&self.view) = View::Input;
        self.sync_identity().await;
    }

    /// Apply pending identity changes to the aggregate: clear it on every
    /// change, and fetch once if an identity is present at the end.
    pub async fn sync_identity(&self) -> Option<Result<FetchOutcome>> {
        let mut fetch = false;
        for event in self.drain_identity_events() {
            self.aggregate.replace(Vec::new());
            fetch = match event {
                IdentityEvent::Present(id) => {
                    debug!(identity = %id, "identity present");
                    true
                }
                IdentityEvent::Absent => {
                    debug!("identity absent, aggregate cleared");
                    false
                }
            };
        }

        if fetch {
            Some(self.refresh(RefreshTrigger::Automatic).await)
        } else {
            None
        }
    }

    fn drain_identity_events(&self) -> Vec<IdentityEvent> {
        let mut rx = lock(&self.identity_events);
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "identity events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Show `view`. Opening the dashboard with nothing loaded triggers a
    /// fetch for the signed-in identity.
    pub async fn switch_view(&self, view: View) -> Result<FetchOutcome> {
        *lock(&self.view) = view;
        let signed_in = lock(&self.session).identity().is_some();
        if view == View::Dashboard && signed_in && self.aggregate.is_empty() {
            return self.refresh(RefreshTrigger::Automatic).await;
        }
        Ok(FetchOutcome::Skipped)
    }

    /// Fetch every routine for the current identity and replace the
    /// aggregate with the result.
    ///
    /// # Errors
    ///
    /// A failed fetch leaves the aggregate untouched, publishes an error
    /// notification and returns the cause.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> Result<FetchOutcome> {
        let Some(ticket) = lock(&self.session).ticket() else {
            debug!("refresh skipped, session not ready");
            return Ok(FetchOutcome::Skipped);
        };

        let fetched = {
            let _loading = InFlight::enter(&self.in_flight);
            self.client.fetch_routines(&ticket).await
        };

        if !self.is_current(&ticket) {
            debug!(epoch = ticket.epoch, "discarding response for a previous identity");
            return Ok(FetchOutcome::Stale);
        }

        match fetched {
            Ok(entries) => {
                let count = entries.len();
                self.aggregate.replace(entries);
                info!(count, "routines loaded");
                if trigger == RefreshTrigger::Manual {
                    self.notifications.success(messages::REFRESH_SUCCEEDED);
                }
                Ok(FetchOutcome::Applied { count })
            }
            Err(e) => {
                warn!("fetch failed: {e}");
                self.notifications.error(messages::FETCH_FAILED);
                Err(e.into())
            }
        }
    }

    /// Send the draft to the store as today's routine.
    ///
    /// On success the draft is reset, the dashboard is shown and a fetch
    /// follows. On failure the draft is kept so the user can retry. If the
    /// identity changed while the request was out, only the success
    /// notification is published and the refresh is reported as stale.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let ticket = match self.submit_ticket() {
            Ok(ticket) => ticket,
            Err(e) => {
                let message = match &e {
                    CoreError::Auth(auth) => auth.user_message(),
                    _ => messages::CONFIGURE_ENDPOINT.to_string(),
                };
                self.notifications.error(message);
                return Err(e);
            }
        };

        let date = Local::now().date_naive();
        let payload = lock(&self.draft).to_payload(&ticket.identity, date);

        let submitted = {
            let _loading = InFlight::enter(&self.in_flight);
            self.client.submit_routine(&ticket, &payload).await
        };

        if let Err(e) = submitted {
            warn!("submit failed: {e}");
            self.notifications.error(messages::SUBMIT_FAILED);
            return Err(e.into());
        }

        info!(duration = payload.duration, %date, "routine submitted");
        self.notifications.success(messages::SUBMIT_SUCCEEDED);

        // The write happened, but the draft and view now belong to whoever
        // is signed in after the request went out.
        if !self.is_current(&ticket) {
            debug!(epoch = ticket.epoch, "identity changed during submit, keeping draft");
            return Ok(SubmitOutcome {
                date,
                refresh: Ok(FetchOutcome::Stale),
            });
        }

        lock(&self.draft).reset_after_submit();
        *lock(&self.view) = View::Dashboard;

        let refresh = self.refresh(RefreshTrigger::Automatic).await;
        Ok(SubmitOutcome { date, refresh })
    }

    fn submit_ticket(&self) -> Result<SessionTicket> {
        let session = lock(&self.session);
        if session.endpoint().is_empty() {
            return Err(ConfigError::MissingEndpoint.into());
        }
        session.ticket().ok_or_else(|| AuthError::NotSignedIn.into())
    }

    fn is_current(&self, ticket: &SessionTicket) -> bool {
        lock(&self.session).is_current(ticket)
    }
}
