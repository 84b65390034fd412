//! Endpoint and identity commands.

use serde::Serialize;
use solver_core::{AgentIdProvider, Config, FetchOutcome, IdentitySource};

use super::{open_app, print_notification, CommandResult};

#[derive(Serialize)]
struct StatusReport {
    endpoint: String,
    user_id: Option<String>,
    source: Option<&'static str>,
    ready: bool,
    config_path: String,
}

pub fn endpoint(url: Option<String>) -> CommandResult {
    let app = open_app()?;
    match url {
        Some(url) => {
            app.set_endpoint(&url);
            println!("endpoint set to {}", app.endpoint());
        }
        None if app.endpoint().is_empty() => println!("(not configured)"),
        None => println!("{}", app.endpoint()),
    }
    Ok(())
}

pub async fn login(agent_id: &str) -> CommandResult {
    let app = open_app()?;
    let outcome = app
        .sign_in(&mut AgentIdProvider::new(agent_id))
        .await
        .inspect_err(|_| print_notification(&app))?;

    println!("signed in as {}", outcome.user_id);
    match outcome.fetch {
        Some(Ok(FetchOutcome::Applied { count })) => println!("{count} routines on record"),
        Some(Err(_)) => print_notification(&app),
        _ => {}
    }
    Ok(())
}

pub async fn logout() -> CommandResult {
    let app = open_app()?;
    if app.user_id().is_none() {
        println!("not signed in");
        return Ok(());
    }
    app.logout().await;
    println!("signed out");
    Ok(())
}

pub fn status(json: bool) -> CommandResult {
    let app = open_app()?;
    let user_id = app.user_id();
    let report = StatusReport {
        endpoint: app.endpoint(),
        ready: !app.endpoint().is_empty() && user_id.is_some(),
        source: app.identity_source().map(|source| match source {
            IdentitySource::Agent => "agent",
            IdentitySource::Federated => "federated",
        }),
        user_id,
        config_path: Config::path()?.display().to_string(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let endpoint = if report.endpoint.is_empty() {
        "(not configured)"
    } else {
        &report.endpoint
    };
    println!("Endpoint: {endpoint}");
    println!(
        "Identity: {}",
        report.user_id.as_deref().unwrap_or("(signed out)")
    );
    println!("Config:   {}", report.config_path);
    Ok(())
}
