//! Tests for sync types module.

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use crate::routine::Activity;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_store_output() {
        // Shape produced by the store: numbers as floats, extra bookkeeping keys.
        let body = r#"[
            {"userId": "Solver001", "timestamp": 1741939200, "routineId": "r-1",
             "date": "2025-03-14", "duration": 65.0, "mood": 8.0, "productivity": 6.0,
             "activities": ["coffee", "exercise", "meditation"], "solver_score": 2.15},
            {"date": "2025-03-13", "duration": 20, "mood": 7, "activities": [],
             "solver_score": 7.0}
        ]"#;

        let entries = parse_routines(body).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(entries[0].duration, 65);
        assert_eq!(entries[0].mood, 8);
        assert_eq!(entries[0].productivity, Some(6));
        assert_eq!(
            entries[0].activities,
            vec![Activity::Coffee, Activity::Exercise, Activity::Meditation]
        );
        assert_eq!(entries[0].solver_score, 2.15);
        assert_eq!(entries[0].short_label(), "03-14");

        assert_eq!(entries[1].productivity, None);
        assert!(entries[1].activities.is_empty());
    }

    #[test]
    fn test_missing_activities_defaults_to_empty() {
        let body = r#"[{"date": "2025-03-13", "duration": 20, "mood": 7, "solver_score": 7.0}]"#;
        let entries = parse_routines(body).unwrap();
        assert!(entries[0].activities.is_empty());
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_routines("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let result = parse_routines(r#"{"error": "Missing userId query parameter"}"#);
        assert!(matches!(result, Err(SyncError::Parse(_))));
    }

    #[test]
    fn test_rejects_out_of_range_mood() {
        let body = r#"[{"date": "2025-03-13", "duration": 20, "mood": 11, "solver_score": 7.0}]"#;
        let err = parse_routines(body).unwrap_err();
        assert!(err.to_string().contains("record 0"), "{err}");
    }

    #[test]
    fn test_rejects_fractional_duration() {
        let body = r#"[{"date": "2025-03-13", "duration": 20.5, "mood": 7, "solver_score": 7.0}]"#;
        assert!(matches!(parse_routines(body), Err(SyncError::Parse(_))));
    }

    #[test]
    fn test_rejects_bad_date() {
        let body = r#"[{"date": "14/03/2025", "duration": 20, "mood": 7, "solver_score": 7.0}]"#;
        assert!(matches!(parse_routines(body), Err(SyncError::Parse(_))));
    }

    #[test]
    fn test_rejects_unknown_activity() {
        let body = r#"[{"date": "2025-03-13", "duration": 20, "mood": 7,
                        "activities": ["core"], "solver_score": 7.0}]"#;
        assert!(matches!(parse_routines(body), Err(SyncError::Parse(_))));
    }
}
