pub mod config;
pub mod history;
pub mod routine;
pub mod session;

use solver_core::session::ConfigFilePersistence;
use solver_core::{Config, NotificationChannel, NotificationKind, RoutineApp, Session, SyncClient};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build the app from the on-disk config and session.
pub fn open_app() -> Result<RoutineApp, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    debug!(
        endpoint = %config.api_url,
        window_secs = config.notifications.window_secs,
        "opening session"
    );
    let session = Session::open(Box::new(ConfigFilePersistence::default_location()?));
    Ok(RoutineApp::new(
        session,
        SyncClient::new(),
        NotificationChannel::new(config.notifications.window()),
    ))
}

/// Print whatever notification is showing: successes to stdout, errors to
/// stderr.
pub fn print_notification(app: &RoutineApp) {
    if let Some(notification) = app.notifications().current() {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            NotificationKind::Error => eprintln!("{}", notification.message),
        }
    }
}
