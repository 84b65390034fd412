//! The draft routine entry and its derived values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::record::RoutinePayload;
use crate::score::{preview_score, ScoreBreakdown};

/// Mood and productivity start here when the input view opens.
pub const DEFAULT_RATING: u8 = 7;
/// "Getting ready" time; the only duration that survives a reset.
pub const DEFAULT_CORE_MINUTES: u32 = 20;

const RATING_RANGE: RangeInclusive<u8> = 1..=10;

/// Activity keys that carry a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKey {
    Exercise,
    Reading,
    Meditation,
    Core,
}

impl DurationKey {
    pub const ALL: [DurationKey; 4] = [
        DurationKey::Exercise,
        DurationKey::Reading,
        DurationKey::Meditation,
        DurationKey::Core,
    ];

    /// Slider granularity used by every duration control.
    pub const STEP_MINUTES: u32 = 5;

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationKey::Exercise => "exercise",
            DurationKey::Reading => "reading",
            DurationKey::Meditation => "meditation",
            DurationKey::Core => "core",
        }
    }

    /// Range offered by the input control. Core never goes below 5.
    pub fn control_range(&self) -> RangeInclusive<u32> {
        match self {
            DurationKey::Exercise | DurationKey::Reading => 0..=90,
            DurationKey::Meditation => 0..=60,
            DurationKey::Core => 5..=60,
        }
    }

    /// Label this duration contributes to the activity list, if any.
    pub fn activity(&self) -> Option<Activity> {
        match self {
            DurationKey::Exercise => Some(Activity::Exercise),
            DurationKey::Reading => Some(Activity::Reading),
            DurationKey::Meditation => Some(Activity::Meditation),
            DurationKey::Core => None,
        }
    }
}

impl FromStr for DurationKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exercise" => Ok(DurationKey::Exercise),
            "reading" => Ok(DurationKey::Reading),
            "meditation" => Ok(DurationKey::Meditation),
            "core" => Ok(DurationKey::Core),
            other => Err(format!("unknown duration key: {other}")),
        }
    }
}

impl fmt::Display for DurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels attached to a submitted routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Coffee,
    Exercise,
    Reading,
    Meditation,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Coffee => "coffee",
            Activity::Exercise => "exercise",
            Activity::Reading => "reading",
            Activity::Meditation => "meditation",
        }
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" => Ok(Activity::Coffee),
            "exercise" => Ok(Activity::Exercise),
            "reading" => Ok(Activity::Reading),
            "meditation" => Ok(Activity::Meditation),
            other => Err(format!("unknown activity: {other}")),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minutes spent per activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub exercise: u32,
    pub reading: u32,
    pub meditation: u32,
    pub core: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            exercise: 0,
            reading: 0,
            meditation: 0,
            core: DEFAULT_CORE_MINUTES,
        }
    }
}

impl Durations {
    pub fn get(&self, key: DurationKey) -> u32 {
        match key {
            DurationKey::Exercise => self.exercise,
            DurationKey::Reading => self.reading,
            DurationKey::Meditation => self.meditation,
            DurationKey::Core => self.core,
        }
    }

    pub fn set(&mut self, key: DurationKey, minutes: u32) {
        match key {
            DurationKey::Exercise => self.exercise = minutes,
            DurationKey::Reading => self.reading = minutes,
            DurationKey::Meditation => self.meditation = minutes,
            DurationKey::Core => self.core = minutes,
        }
    }

    /// Copy with `key` set from raw control input. Never fails: unparsable
    /// input becomes 0 and negatives floor at 0.
    pub fn with_updated(mut self, key: DurationKey, raw: &str) -> Self {
        self.set(key, parse_minutes(raw));
        self
    }

    pub fn total(&self) -> u32 {
        compute_total(self)
    }
}

/// Read an integer the way a form control reports it: optional sign, then
/// leading digits; anything after the digits is ignored. No digits means 0.
pub fn parse_minutes(raw: &str) -> u32 {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if !seen_digit || negative {
        return 0;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Sum of every duration.
pub fn compute_total(durations: &Durations) -> u32 {
    DurationKey::ALL
        .iter()
        .fold(0u32, |acc, key| acc.saturating_add(durations.get(*key)))
}

/// Activity labels for a draft: coffee first, then each timed activity that
/// actually happened. Core time is never an activity.
pub fn build_activity_list(entry: &DraftEntry) -> Vec<Activity> {
    let mut activities = Vec::with_capacity(4);
    if entry.has_coffee {
        activities.push(Activity::Coffee);
    }
    for key in [
        DurationKey::Exercise,
        DurationKey::Reading,
        DurationKey::Meditation,
    ] {
        if entry.durations.get(key) > 0 {
            if let Some(activity) = key.activity() {
                activities.push(activity);
            }
        }
    }
    activities
}

/// The routine currently being edited in the input view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEntry {
    pub mood: u8,
    pub productivity: u8,
    pub has_coffee: bool,
    pub durations: Durations,
}

impl Default for DraftEntry {
    fn default() -> Self {
        Self {
            mood: DEFAULT_RATING,
            productivity: DEFAULT_RATING,
            has_coffee: false,
            durations: Durations::default(),
        }
    }
}

impl DraftEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply raw control input for one duration and return the new durations.
    pub fn update_duration(&mut self, key: DurationKey, raw: &str) -> Durations {
        self.durations = self.durations.with_updated(key, raw);
        self.durations
    }

    pub fn set_duration(&mut self, key: DurationKey, minutes: u32) {
        self.durations.set(key, minutes);
    }

    pub fn set_mood(&mut self, mood: u8) {
        self.mood = clamp_rating(mood);
    }

    pub fn set_productivity(&mut self, productivity: u8) {
        self.productivity = clamp_rating(productivity);
    }

    pub fn toggle_coffee(&mut self) {
        self.has_coffee = !self.has_coffee;
    }

    pub fn total_duration(&self) -> u32 {
        self.durations.total()
    }

    pub fn activities(&self) -> Vec<Activity> {
        build_activity_list(self)
    }

    pub fn preview_score(&self) -> f64 {
        preview_score(
            self.mood,
            self.productivity,
            self.total_duration(),
            self.has_coffee,
        )
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::new(
            self.mood,
            self.productivity,
            self.total_duration(),
            self.has_coffee,
        )
    }

    /// Wire payload for submission. The score is left to the remote store.
    pub fn to_payload(&self, user_id: &str, date: NaiveDate) -> RoutinePayload {
        RoutinePayload {
            user_id: user_id.to_string(),
            duration: self.total_duration(),
            mood: self.mood,
            productivity: self.productivity,
            activities: self.activities(),
            date,
        }
    }

    /// Back to defaults after a successful submit, keeping the core time.
    pub fn reset_after_submit(&mut self) {
        let core = self.durations.core;
        *self = Self::default();
        self.durations.core = core;
    }
}

fn clamp_rating(value: u8) -> u8 {
    value.clamp(*RATING_RANGE.start(), *RATING_RANGE.end())
}
