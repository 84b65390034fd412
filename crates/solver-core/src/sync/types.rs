//! Wire types for the remote routine store and their validation.
//!
//! The store returns loosely-typed JSON (numbers come back as floats).
//! Everything is checked here and converted into [`RoutineEntry`] before it
//! reaches the aggregate.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::routine::{Activity, RoutineEntry};

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Remote store returned HTTP {status}")]
    Status { status: u16 },

    #[error("Unexpected response shape: {0}")]
    Parse(String),

    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Parse(err.to_string())
    }
}

/// A routine record exactly as the store sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRoutine {
    pub date: String,
    pub duration: f64,
    pub mood: f64,
    #[serde(default)]
    pub productivity: Option<f64>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub solver_score: f64,
}

impl TryFrom<RemoteRoutine> for RoutineEntry {
    type Error = String;

    fn try_from(remote: RemoteRoutine) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&remote.date, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{}': {e}", remote.date))?;

        let duration = whole_number("duration", remote.duration, 0.0, f64::from(u32::MAX))?;
        let mood = whole_number("mood", remote.mood, 1.0, 10.0)?;
        let productivity = remote
            .productivity
            .map(|p| whole_number("productivity", p, 1.0, 10.0))
            .transpose()?;

        let activities = remote
            .activities
            .iter()
            .map(|a| a.parse::<Activity>())
            .collect::<Result<Vec<_>, _>>()?;

        if !remote.solver_score.is_finite() {
            return Err("solver_score is not a finite number".to_string());
        }

        Ok(RoutineEntry {
            date,
            duration: duration as u32,
            mood: mood as u8,
            productivity: productivity.map(|p| p as u8),
            activities,
            solver_score: remote.solver_score,
        })
    }
}

fn whole_number(field: &str, value: f64, min: f64, max: f64) -> Result<f64, String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("{field} must be a whole number, got {value}"));
    }
    if value < min || value > max {
        return Err(format!("{field} {value} outside {min}..={max}"));
    }
    Ok(value)
}

/// Decode a fetch response body into validated entries, preserving order.
pub fn parse_routines(body: &str) -> Result<Vec<RoutineEntry>, SyncError> {
    let records: Vec<RemoteRoutine> = serde_json::from_str(body)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            RoutineEntry::try_from(record)
                .map_err(|message| SyncError::Parse(format!("record {index}: {message}")))
        })
        .collect()
}
