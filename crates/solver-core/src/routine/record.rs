//! Submitted payloads and fetched routine records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::Activity;

/// Body of `POST {endpoint}/routines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePayload {
    pub user_id: String,
    /// Total minutes across all durations.
    pub duration: u32,
    pub mood: u8,
    pub productivity: u8,
    pub activities: Vec<Activity>,
    pub date: NaiveDate,
}

/// A routine as persisted by the remote store.
///
/// `solver_score` is whatever the store computed; the client never
/// recomputes or validates it against the preview formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutineEntry {
    pub date: NaiveDate,
    pub duration: u32,
    pub mood: u8,
    pub productivity: Option<u8>,
    pub activities: Vec<Activity>,
    pub solver_score: f64,
}

impl RoutineEntry {
    /// Short `MM-DD` axis label.
    pub fn short_label(&self) -> String {
        self.date.format("%m-%d").to_string()
    }
}
