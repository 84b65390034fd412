//! Draft a routine, preview its score, log it.

use clap::Args;
use serde::Serialize;
use solver_core::app::messages;
use solver_core::{Activity, DraftEntry, DurationKey, ScoreBreakdown};

use super::{open_app, print_notification, CommandResult};

/// Routine fields. Durations are read like form input: leading digits count,
/// anything unparseable is 0.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Mood rating, 1-10
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub mood: u8,
    /// Productivity rating, 1-10
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub productivity: u8,
    /// Had coffee
    #[arg(long)]
    pub coffee: bool,
    /// Exercise minutes
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub exercise: String,
    /// Reading minutes
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub reading: String,
    /// Meditation minutes
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub meditation: String,
    /// Core work minutes
    #[arg(long, default_value = "20", allow_hyphen_values = true)]
    pub core: String,
}

impl DraftArgs {
    pub fn apply(&self, draft: &mut DraftEntry) {
        draft.set_mood(self.mood);
        draft.set_productivity(self.productivity);
        draft.has_coffee = self.coffee;
        for (key, raw) in [
            (DurationKey::Exercise, &self.exercise),
            (DurationKey::Reading, &self.reading),
            (DurationKey::Meditation, &self.meditation),
            (DurationKey::Core, &self.core),
        ] {
            draft.update_duration(key, raw);
        }
    }
}

#[derive(Serialize)]
struct PreviewReport {
    total_duration: u32,
    activities: Vec<Activity>,
    #[serde(flatten)]
    breakdown: ScoreBreakdown,
    display: String,
}

pub fn preview(args: &DraftArgs, json: bool) -> CommandResult {
    let mut draft = DraftEntry::new();
    args.apply(&mut draft);
    let breakdown = draft.breakdown();

    if json {
        let report = PreviewReport {
            total_duration: draft.total_duration(),
            activities: draft.activities(),
            breakdown,
            display: breakdown.display(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let activities: Vec<&str> = draft.activities().iter().map(Activity::as_str).collect();
    println!("Total time:      {} min", draft.total_duration());
    println!("Activities:      {}", activities.join(", "));
    println!("Raw output:      {}", breakdown.raw_output);
    println!("Time multiplier: {:.3}", breakdown.time_multiplier);
    println!("Coffee modifier: x{}", breakdown.coffee_modifier);
    println!("Solver score:    {}", breakdown.display());
    Ok(())
}

pub async fn log(args: &DraftArgs) -> CommandResult {
    let app = open_app()?;
    app.edit_draft(|draft| args.apply(draft));

    let outcome = app.submit().await.inspect_err(|_| print_notification(&app))?;
    // A failed follow-up fetch replaces the slot, so the success line is
    // printed directly.
    println!("{}", messages::SUBMIT_SUCCEEDED);
    println!("logged routine for {}", outcome.date);
    if let Err(e) = outcome.refresh {
        print_notification(&app);
        eprintln!("warning: history not refreshed: {e}");
    }
    Ok(())
}
