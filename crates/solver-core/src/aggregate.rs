//! The fetched routines for the active identity.
//!
//! The only mutation is a wholesale swap. Readers take an `Arc` snapshot
//! and never see a half-applied update.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::routine::RoutineEntry;

/// One point on the score/mood chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `MM-DD`
    pub label: String,
    pub solver_score: f64,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub count: usize,
    pub mean_score: f64,
    pub best_score: f64,
    pub mean_mood: f64,
    pub latest_date: NaiveDate,
}

#[derive(Debug)]
pub struct RoutineAggregate {
    entries: RwLock<Arc<[RoutineEntry]>>,
}

impl Default for RoutineAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutineAggregate {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::from(Vec::<RoutineEntry>::new())),
        }
    }

    /// Swap in a new sequence.
    pub fn replace(&self, entries: Vec<RoutineEntry>) {
        let next: Arc<[RoutineEntry]> = Arc::from(entries);
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn snapshot(&self) -> Arc<[RoutineEntry]> {
        Arc::clone(&self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Chart points in date order, oldest first. Entries on the same date
    /// keep their fetched order.
    pub fn trend(&self) -> Vec<TrendPoint> {
        let mut points: Vec<TrendPoint> = self
            .snapshot()
            .iter()
            .map(|entry| TrendPoint {
                date: entry.date,
                label: entry.short_label(),
                solver_score: entry.solver_score,
                mood: entry.mood,
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }

    /// `None` when there is nothing to summarise.
    pub fn summary(&self) -> Option<AggregateSummary> {
        let entries = self.snapshot();
        let latest_date = entries.iter().map(|e| e.date).max()?;
        let count = entries.len();
        let n = count as f64;

        let mean_score = entries.iter().map(|e| e.solver_score).sum::<f64>() / n;
        let best_score = entries
            .iter()
            .map(|e| e.solver_score)
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_mood = entries.iter().map(|e| f64::from(e.mood)).sum::<f64>() / n;

        Some(AggregateSummary {
            count,
            mean_score,
            best_score,
            mean_mood,
            latest_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::Activity;

    fn entry(day: u32, score: f64, mood: u8) -> RoutineEntry {
        RoutineEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            duration: 30,
            mood,
            productivity: Some(7),
            activities: vec![Activity::Reading],
            solver_score: score,
        }
    }

    #[test]
    fn starts_empty() {
        let aggregate = RoutineAggregate::new();
        assert!(aggregate.is_empty());
        assert!(aggregate.summary().is_none());
        assert!(aggregate.trend().is_empty());
    }

    #[test]
    fn replace_is_wholesale() {
        let aggregate = RoutineAggregate::new();
        aggregate.replace(vec![entry(1, 1.0, 5), entry(2, 2.0, 6)]);
        assert_eq!(aggregate.len(), 2);

        aggregate.replace(vec![entry(3, 3.0, 7)]);
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate.snapshot()[0].solver_score, 3.0);

        aggregate.replace(Vec::new());
        assert!(aggregate.is_empty());
    }

    #[test]
    fn snapshots_are_unaffected_by_later_replace() {
        let aggregate = RoutineAggregate::new();
        aggregate.replace(vec![entry(1, 1.0, 5)]);
        let before = aggregate.snapshot();

        aggregate.replace(vec![entry(2, 2.0, 6), entry(3, 3.0, 7)]);
        assert_eq!(before.len(), 1);
        assert_eq!(aggregate.len(), 2);
    }

    #[test]
    fn trend_is_oldest_first() {
        let aggregate = RoutineAggregate::new();
        // Store returns newest first.
        aggregate.replace(vec![entry(14, 2.5, 8), entry(12, 1.5, 6), entry(13, 2.0, 7)]);

        let labels: Vec<_> = aggregate.trend().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["03-12", "03-13", "03-14"]);
    }

    #[test]
    fn summary_statistics() {
        let aggregate = RoutineAggregate::new();
        aggregate.replace(vec![entry(14, 3.0, 8), entry(12, 1.0, 6)]);

        let summary = aggregate.summary().unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.mean_score - 2.0).abs() < 1e-12);
        assert_eq!(summary.best_score, 3.0);
        assert!((summary.mean_mood - 7.0).abs() < 1e-12);
        assert_eq!(summary.latest_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }
}
