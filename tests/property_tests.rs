//! Property tests for the invariants the analyzers rely on.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use gymrs::enrich::{enrich, estimate_one_rep_max};
use gymrs::import::RawSetRecord;
use gymrs::models::MuscleGroup;
use gymrs::muscles::classify;
use gymrs::progression::percent_change;
use gymrs::prs::flag_personal_records;

const EXERCISES: [&str; 4] = ["Bench Press", "Squat", "Deadlift", "Some Odd Movement"];

fn raw_record(day_offset: u16, exercise: usize, weight: u32, reps: u32) -> RawSetRecord {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    RawSetRecord {
        date: start + Duration::days(i64::from(day_offset)),
        workout_name: "Workout".to_string(),
        exercise_name: EXERCISES[exercise % EXERCISES.len()].to_string(),
        set_order: 1,
        weight: Decimal::from(weight),
        reps,
        rpe: None,
        distance: None,
        duration_seconds: None,
        notes: None,
    }
}

prop_compose! {
    fn arb_dataset()(rows in prop::collection::vec(
        (0u16..120, 0usize..4, 0u32..250, 0u32..20),
        1..60,
    )) -> Vec<RawSetRecord> {
        rows.into_iter()
            .map(|(day, exercise, weight, reps)| raw_record(day, exercise, weight, reps))
            .collect()
    }
}

proptest! {
    #[test]
    fn prop_volume_always_weight_times_reps(records in arb_dataset()) {
        for set in enrich(records) {
            prop_assert_eq!(set.volume, set.weight * Decimal::from(set.reps));
        }
    }

    #[test]
    fn prop_pr_flagging_is_idempotent(records in arb_dataset()) {
        let once = flag_personal_records(enrich(records));
        let twice = flag_personal_records(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_pr_values_strictly_exceed_all_earlier(records in arb_dataset()) {
        let sets = flag_personal_records(enrich(records));

        // Replay chronologically per exercise and confirm each flag
        let mut order: Vec<usize> = (0..sets.len()).collect();
        order.sort_by(|&a, &b| {
            sets[a].exercise_name.cmp(&sets[b].exercise_name)
                .then(sets[a].date.cmp(&sets[b].date))
                .then(a.cmp(&b))
        });

        let mut max_weight: HashMap<&str, Decimal> = HashMap::new();
        for idx in order {
            let set = &sets[idx];
            let best = max_weight.entry(set.exercise_name.as_str()).or_default();
            prop_assert_eq!(set.pr.weight, set.weight > *best);
            *best = (*best).max(set.weight);
            // The any-flag is exactly the OR of the four dimensions
            prop_assert_eq!(
                set.pr.any,
                set.pr.weight || set.pr.reps || set.pr.volume || set.pr.one_rep_max
            );
        }
    }

    #[test]
    fn prop_one_rep_max_formula_domain(weight in 1u32..500, reps in 1u32..37) {
        let weight = Decimal::from(weight);
        let expected = weight * Decimal::from(36u32) / Decimal::from(37 - reps);
        prop_assert_eq!(estimate_one_rep_max(weight, reps), expected);
    }

    #[test]
    fn prop_one_rep_max_zero_inputs(weight in 0u32..500, reps in 0u32..50) {
        if weight == 0 || reps == 0 {
            prop_assert_eq!(
                estimate_one_rep_max(Decimal::from(weight), reps),
                Decimal::ZERO
            );
        } else {
            prop_assert!(estimate_one_rep_max(Decimal::from(weight), reps) > Decimal::ZERO);
        }
    }

    #[test]
    fn prop_classifier_is_total_and_deterministic(name in ".*") {
        let first = classify(&name);
        let second = classify(&name);
        prop_assert_eq!(first, second);
        prop_assert!(MuscleGroup::ALL.contains(&first));
    }

    #[test]
    fn prop_percent_change_never_divides_by_zero(
        first in -1000i64..1000,
        last in -1000i64..1000,
    ) {
        let first = Decimal::from(first);
        let last = Decimal::from(last);
        let change = percent_change(first, last);
        if first == Decimal::ZERO {
            prop_assert_eq!(change, Decimal::ZERO);
        } else {
            prop_assert_eq!(change, (last - first) / first * dec!(100));
        }
    }
}
