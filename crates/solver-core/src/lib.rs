//! # Solver Society Core Library
//!
//! This library provides the core logic for the Solver Society daily routine
//! logger. A front end (the `solver-cli` binary, or any GUI) collects a
//! routine draft, shows a live score preview, submits the routine to a
//! remote store and displays the user's history.
//!
//! ## Architecture
//!
//! - **Routine**: The draft entry, duration parsing, and the activity list
//! - **Score**: The client-side preview score and its breakdown
//! - **Session**: Endpoint and identity, with identity change events
//! - **Sync**: HTTP client for the remote routine store
//! - **Aggregate**: The fetched routines for the active identity
//! - **Notify**: A single transient notification slot
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RoutineApp`]: Runs sign-in, submit and refresh against the parts above
//! - [`DraftEntry`]: The routine being edited
//! - [`SyncClient`]: Fetch and submit against the store
//! - [`Config`]: Application configuration management

pub mod aggregate;
pub mod app;
pub mod auth;
pub mod error;
pub mod notify;
pub mod routine;
pub mod score;
pub mod session;
pub mod storage;
pub mod sync;

pub use aggregate::{AggregateSummary, RoutineAggregate, TrendPoint};
pub use app::{FetchOutcome, RefreshTrigger, RoutineApp, SignInOutcome, SubmitOutcome, View};
pub use auth::{AgentIdProvider, FederatedConfig, FederatedSignIn, IdentityProvider};
pub use error::{AuthError, ConfigError, CoreError, ErrorCategory};
pub use notify::{Notification, NotificationChannel, NotificationKind};
pub use routine::{Activity, DraftEntry, DurationKey, Durations, RoutineEntry, RoutinePayload};
pub use score::{preview_score, ScoreBreakdown, COFFEE_MODIFIER};
pub use session::{Identity, IdentityEvent, IdentitySource, Session, SessionTicket};
pub use storage::Config;
pub use sync::{SyncClient, SyncError};
