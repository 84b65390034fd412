//! Tests for the routine entry model.

#[cfg(test)]
mod tests {
    use super::super::entry::*;
    use chrono::NaiveDate;

    fn scenario_draft() -> DraftEntry {
        let mut draft = DraftEntry::new();
        draft.update_duration(DurationKey::Exercise, "30");
        draft.update_duration(DurationKey::Reading, "0");
        draft.update_duration(DurationKey::Meditation, "15");
        draft.update_duration(DurationKey::Core, "20");
        draft.set_mood(8);
        draft.set_productivity(6);
        draft.toggle_coffee();
        draft
    }

    #[test]
    fn test_draft_defaults() {
        let draft = DraftEntry::new();
        assert_eq!(draft.mood, 7);
        assert_eq!(draft.productivity, 7);
        assert!(!draft.has_coffee);
        assert_eq!(
            draft.durations,
            Durations {
                exercise: 0,
                reading: 0,
                meditation: 0,
                core: 20
            }
        );
        assert_eq!(draft.total_duration(), 20);
    }

    #[test]
    fn test_parse_minutes_never_fails() {
        assert_eq!(parse_minutes("45"), 45);
        assert_eq!(parse_minutes(" 10 "), 10);
        assert_eq!(parse_minutes("30min"), 30);
        assert_eq!(parse_minutes("12.5"), 12);
        assert_eq!(parse_minutes(""), 0);
        assert_eq!(parse_minutes("abc"), 0);
        assert_eq!(parse_minutes("-15"), 0);
        assert_eq!(parse_minutes("+5"), 5);
        assert_eq!(parse_minutes("99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_update_duration_substitutes_zero() {
        let mut draft = DraftEntry::new();
        draft.update_duration(DurationKey::Exercise, "25");
        let durations = draft.update_duration(DurationKey::Exercise, "not a number");
        assert_eq!(durations.exercise, 0);
        assert_eq!(draft.durations.exercise, 0);
    }

    #[test]
    fn test_compute_total_sums_all_keys() {
        let inputs = [
            ("10", "20", "30", "40", 100),
            ("x", "5", "", "20", 25),
            ("-3", "0", "0", "5", 5),
        ];
        for (e, r, m, c, expected) in inputs {
            let durations = Durations::default()
                .with_updated(DurationKey::Exercise, e)
                .with_updated(DurationKey::Reading, r)
                .with_updated(DurationKey::Meditation, m)
                .with_updated(DurationKey::Core, c);
            assert_eq!(compute_total(&durations), expected);
        }
    }

    #[test]
    fn test_activity_list_never_includes_core() {
        let mut draft = DraftEntry::new();
        draft.set_duration(DurationKey::Core, 60);
        assert!(build_activity_list(&draft).is_empty());
    }

    #[test]
    fn test_activity_list_coffee_first() {
        let mut draft = DraftEntry::new();
        draft.set_duration(DurationKey::Meditation, 10);
        draft.set_duration(DurationKey::Exercise, 5);
        draft.has_coffee = true;
        assert_eq!(
            build_activity_list(&draft),
            vec![Activity::Coffee, Activity::Exercise, Activity::Meditation]
        );
    }

    #[test]
    fn test_scenario_draft_derived_values() {
        let draft = scenario_draft();
        assert_eq!(draft.total_duration(), 65);
        assert_eq!(
            draft.activities(),
            vec![Activity::Coffee, Activity::Exercise, Activity::Meditation]
        );
        let expected = ((8.0 + 6.0) * 10.0 / 65.0) * 1.2;
        assert!((draft.preview_score() - expected).abs() < 1e-9);
        assert_eq!(draft.breakdown().display(), "2.6");
    }

    #[test]
    fn test_ratings_are_clamped() {
        let mut draft = DraftEntry::new();
        draft.set_mood(0);
        draft.set_productivity(42);
        assert_eq!(draft.mood, 1);
        assert_eq!(draft.productivity, 10);
    }

    #[test]
    fn test_payload_shape() {
        let draft = scenario_draft();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let payload = draft.to_payload("agent@solver.dev", date);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "userId": "agent@solver.dev",
                "duration": 65,
                "mood": 8,
                "productivity": 6,
                "activities": ["coffee", "exercise", "meditation"],
                "date": "2025-03-14"
            })
        );
        assert!(json.get("solver_score").is_none());
    }

    #[test]
    fn test_reset_keeps_core_only() {
        let mut draft = scenario_draft();
        draft.set_duration(DurationKey::Core, 35);
        draft.reset_after_submit();

        let mut expected = DraftEntry::new();
        expected.durations.core = 35;
        assert_eq!(draft, expected);
    }

    #[test]
    fn test_control_ranges() {
        assert_eq!(DurationKey::Core.control_range(), 5..=60);
        assert_eq!(DurationKey::Exercise.control_range(), 0..=90);
        assert_eq!(DurationKey::Meditation.control_range(), 0..=60);
        assert_eq!("Reading".parse::<DurationKey>(), Ok(DurationKey::Reading));
        assert!("sleep".parse::<DurationKey>().is_err());
    }
}
