use serde::Serialize;
use solver_core::{Activity, AggregateSummary, AuthError, RefreshTrigger, RoutineEntry};

use super::{open_app, print_notification, CommandResult};

#[derive(Serialize)]
struct HistoryReport<'a> {
    entries: &'a [RoutineEntry],
    summary: Option<AggregateSummary>,
}

pub async fn run(json: bool) -> CommandResult {
    let app = open_app()?;
    if app.user_id().is_none() {
        return Err(AuthError::NotSignedIn.into());
    }
    app.refresh(RefreshTrigger::Automatic)
        .await
        .inspect_err(|_| print_notification(&app))?;

    let entries = app.aggregate().snapshot();
    if json {
        let report = HistoryReport {
            entries: &entries,
            summary: app.aggregate().summary(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("no routines logged yet");
        return Ok(());
    }

    println!(
        "{:<12} {:>8} {:>5} {:>6} {:>7}  Activities",
        "Date", "Minutes", "Mood", "Prod", "Score"
    );
    for entry in entries.iter() {
        let activities: Vec<&str> = entry.activities.iter().map(Activity::as_str).collect();
        let productivity = entry
            .productivity
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<12} {:>8} {:>5} {:>6} {:>7.2}  {}",
            entry.date.to_string(),
            entry.duration,
            entry.mood,
            productivity,
            entry.solver_score,
            activities.join(", ")
        );
    }

    if let Some(summary) = app.aggregate().summary() {
        println!();
        println!(
            "{} routines, mean score {:.2}, best {:.2}, mean mood {:.1}",
            summary.count, summary.mean_score, summary.best_score, summary.mean_mood
        );
    }
    Ok(())
}
