//! Routine model: the draft being edited and the records fetched back.
//!
//! A [`DraftEntry`] lives only in memory. It becomes a [`RoutinePayload`]
//! when submitted; what comes back from the remote store is a
//! [`RoutineEntry`].

pub mod entry;
pub mod record;

#[cfg(test)]
mod entry_tests;

pub use entry::{
    build_activity_list, compute_total, parse_minutes, Activity, DraftEntry, DurationKey,
    Durations, DEFAULT_CORE_MINUTES, DEFAULT_RATING,
};
pub use record::{RoutineEntry, RoutinePayload};
