//! Score engine for the live preview.
//!
//! `score = ((mood + productivity) * 10 / max(total, 1)) * coffee`
//! where the coffee modifier is 1.2 with caffeine and 1.0 without.
//! Persisted entries carry the remote store's own score; this is only the
//! number shown while a draft is being edited.

use serde::Serialize;

/// Multiplier applied when the draft includes coffee.
pub const COFFEE_MODIFIER: f64 = 1.2;

/// Preview score for a draft. Total duration is floored at one minute.
pub fn preview_score(mood: u8, productivity: u8, total_duration: u32, has_coffee: bool) -> f64 {
    ScoreBreakdown::new(mood, productivity, total_duration, has_coffee).score
}

/// Intermediate terms of the formula, as laid out in the input view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// `mood + productivity`
    pub raw_output: u32,
    /// `10 / max(total, 1)`
    pub time_multiplier: f64,
    pub coffee_modifier: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn new(mood: u8, productivity: u8, total_duration: u32, has_coffee: bool) -> Self {
        let raw_output = u32::from(mood) + u32::from(productivity);
        let minutes = f64::from(total_duration.max(1));
        let time_multiplier = 10.0 / minutes;
        let coffee_modifier = if has_coffee { COFFEE_MODIFIER } else { 1.0 };
        let score = (f64::from(raw_output) * 10.0 / minutes) * coffee_modifier;

        Self {
            raw_output,
            time_multiplier,
            coffee_modifier,
            score,
        }
    }

    /// One decimal place, matching the preview panel.
    pub fn display(&self) -> String {
        format!("{:.1}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_scores_like_one_minute() {
        for (m, p) in [(1, 1), (7, 7), (10, 10), (3, 9)] {
            assert_eq!(preview_score(m, p, 0, false), preview_score(m, p, 1, false));
            assert_eq!(preview_score(m, p, 0, true), preview_score(m, p, 1, true));
        }
    }

    #[test]
    fn coffee_scales_score_by_modifier() {
        let plain = preview_score(8, 6, 65, false);
        let caffeinated = preview_score(8, 6, 65, true);
        assert!((caffeinated - plain * COFFEE_MODIFIER).abs() < 1e-12);
    }

    #[test]
    fn reference_scenario() {
        let score = preview_score(8, 6, 65, true);
        assert!((score - 2.5846).abs() < 1e-3, "got {score}");
    }

    #[test]
    fn default_draft_preview() {
        // mood 7, productivity 7, core 20, no coffee
        let breakdown = ScoreBreakdown::new(7, 7, 20, false);
        assert_eq!(breakdown.raw_output, 14);
        assert!((breakdown.time_multiplier - 0.5).abs() < 1e-12);
        assert_eq!(breakdown.coffee_modifier, 1.0);
        assert_eq!(breakdown.display(), "7.0");
    }

    #[test]
    fn deterministic() {
        assert_eq!(preview_score(5, 4, 33, true), preview_score(5, 4, 33, true));
    }
}
