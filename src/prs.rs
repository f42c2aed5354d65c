//! Personal-record engine
//!
//! Scans each exercise's history in chronological order and flags a set on
//! a dimension when its value strictly exceeds every earlier value for the
//! same exercise. Running maxima start at zero, so a dimension must be
//! positive to ever be a record. Ties are never records, and the scan is
//! stable: within one date, sets keep their input order, so only the first
//! set to reach a new maximum gets the flag.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{PrFlags, WorkoutSet};

/// Per-exercise best values over the four tracked dimensions
#[derive(Debug, Clone, Copy, Default)]
struct RunningMaxima {
    weight: Decimal,
    reps: u32,
    volume: Decimal,
    one_rep_max: Decimal,
}

/// Flag personal records across the whole dataset.
///
/// Returns the sets in their original order with `pr` populated.
/// Idempotent: flags are fully recomputed on every call.
pub fn flag_personal_records(mut sets: Vec<WorkoutSet>) -> Vec<WorkoutSet> {
    // Chronological scan order per exercise, stable within a date
    let mut order: Vec<usize> = (0..sets.len()).collect();
    order.sort_by(|&a, &b| {
        sets[a]
            .exercise_name
            .cmp(&sets[b].exercise_name)
            .then(sets[a].date.cmp(&sets[b].date))
            .then(a.cmp(&b))
    });

    let mut maxima: HashMap<String, RunningMaxima> = HashMap::new();
    let mut pr_count = 0usize;

    for idx in order {
        let set = &sets[idx];
        let best = maxima.entry(set.exercise_name.clone()).or_default();

        let flags = PrFlags {
            weight: set.weight > best.weight,
            reps: set.reps > best.reps,
            volume: set.volume > best.volume,
            one_rep_max: set.one_rep_max > best.one_rep_max,
            any: false,
        };
        let flags = PrFlags {
            any: flags.weight || flags.reps || flags.volume || flags.one_rep_max,
            ..flags
        };

        best.weight = best.weight.max(set.weight);
        best.reps = best.reps.max(set.reps);
        best.volume = best.volume.max(set.volume);
        best.one_rep_max = best.one_rep_max.max(set.one_rep_max);

        if flags.any {
            pr_count += 1;
        }
        sets[idx].pr = flags;
    }

    tracing::debug!(sets = sets.len(), prs = pr_count, "personal records flagged");
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::import::RawSetRecord;
    use rust_decimal_macros::dec;

    fn raw(date: &str, exercise: &str, weight: Decimal, reps: u32) -> RawSetRecord {
        RawSetRecord {
            date: date.parse().unwrap(),
            workout_name: "Workout".to_string(),
            exercise_name: exercise.to_string(),
            set_order: 1,
            weight,
            reps,
            rpe: None,
            distance: None,
            duration_seconds: None,
            notes: None,
        }
    }

    fn flagged(records: Vec<RawSetRecord>) -> Vec<WorkoutSet> {
        flag_personal_records(enrich(records))
    }

    #[test]
    fn test_first_positive_set_is_a_record() {
        let sets = flagged(vec![raw("2024-01-15", "Bench Press", dec!(80), 5)]);
        assert!(sets[0].pr.weight);
        assert!(sets[0].pr.reps);
        assert!(sets[0].pr.volume);
        assert!(sets[0].pr.one_rep_max);
        assert!(sets[0].pr.any);
    }

    #[test]
    fn test_strictly_greater_only() {
        let sets = flagged(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            raw("2024-01-17", "Bench Press", dec!(80), 5), // exact tie
        ]);
        assert!(sets[0].pr.any);
        assert!(!sets[1].pr.any);
    }

    #[test]
    fn test_independent_dimensions() {
        let sets = flagged(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            // heavier but fewer reps and lower volume
            raw("2024-01-17", "Bench Press", dec!(85), 3),
        ]);
        assert!(sets[1].pr.weight);
        assert!(!sets[1].pr.reps);
        assert!(!sets[1].pr.volume); // 255 < 400
        assert!(sets[1].pr.one_rep_max); // 85*36/34 > 80*36/32
        assert!(sets[1].pr.any);
    }

    #[test]
    fn test_exercises_do_not_interfere() {
        let sets = flagged(vec![
            raw("2024-01-15", "Squat", dec!(140), 5),
            raw("2024-01-17", "Bench Press", dec!(80), 5),
        ]);
        assert!(sets[1].pr.weight, "lighter exercise still sets its own PRs");
    }

    #[test]
    fn test_zero_values_never_records() {
        let sets = flagged(vec![
            raw("2024-01-15", "Plank", dec!(0), 0),
            raw("2024-01-17", "Plank", dec!(0), 0),
        ]);
        assert!(!sets[0].pr.any);
        assert!(!sets[1].pr.any);
    }

    #[test]
    fn test_same_day_only_first_maximum_flagged() {
        let sets = flagged(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            raw("2024-01-15", "Bench Press", dec!(80), 5),
        ]);
        assert!(sets[0].pr.weight);
        assert!(!sets[1].pr.weight);
    }

    #[test]
    fn test_unsorted_input_scanned_chronologically() {
        // Later date appears first in the input
        let sets = flagged(vec![
            raw("2024-02-01", "Bench Press", dec!(85), 5),
            raw("2024-01-15", "Bench Press", dec!(80), 5),
        ]);
        // Both are weight PRs in chronological terms, and output order is
        // preserved
        assert_eq!(sets[0].date, "2024-02-01".parse().unwrap());
        assert!(sets[0].pr.weight);
        assert!(sets[1].pr.weight);
    }

    #[test]
    fn test_idempotent() {
        let once = flagged(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            raw("2024-01-17", "Bench Press", dec!(85), 3),
            raw("2024-01-19", "Squat", dec!(100), 8),
        ]);
        let twice = flag_personal_records(once.clone());
        assert_eq!(once, twice);
    }
}
