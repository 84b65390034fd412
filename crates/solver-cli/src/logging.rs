//! Tracing setup.
//!
//! `RUST_LOG` wins when set. Otherwise the `log_level` from the config file
//! applies to both crates. Output goes to stderr so command output on stdout
//! stays machine-readable.

use solver_core::Config;
use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = Config::load_or_default().log_level;
        EnvFilter::new(format!("solver_core={level},solver_cli={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
