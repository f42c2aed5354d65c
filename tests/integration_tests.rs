//! End-to-end tests over the full pipeline: CSV import, enrichment,
//! PR flagging, analyzers, and the records registry.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gymrs::balance::{compute_balance, BalanceThresholds, Severity};
use gymrs::enrich::{enrich, summarize};
use gymrs::import::csv::StrongCsvImporter;
use gymrs::models::{MuscleGroup, WorkoutSet};
use gymrs::muscles::classify;
use gymrs::progression::{detect_plateaus, exercise_progression, most_improved};
use gymrs::prs::flag_personal_records;
use gymrs::registry::{RecordDimension, RecordsRegistry};

const HEADER: &str = "Date;Workout Name;Exercise Name;Set Order;Weight (kg);Reps;RPE;Notes";

fn dataset_from_csv(rows: &[&str]) -> Vec<WorkoutSet> {
    let data = format!("{}\n{}", HEADER, rows.join("\n"));
    let records = StrongCsvImporter::new()
        .import_reader(data.as_bytes())
        .unwrap();
    flag_personal_records(enrich(records))
}

#[test]
fn test_full_pipeline_from_csv() {
    let sets = dataset_from_csv(&[
        "2024-01-01 10:00:00;Push Day;Bench Press;1;60;5;8;",
        "2024-01-01 10:00:00;Push Day;Bench Press;2;60;5;9;grindy",
        "2024-01-08 10:00:00;Push Day;Bench Press;1;65;5;8;",
        "2024-01-08 10:00:00;Push Day;Incline Dumbbell Bench Press;1;24;10;;",
    ]);

    assert_eq!(sets.len(), 4);
    // Derived fields all populated
    for set in &sets {
        assert_eq!(set.volume, set.weight * Decimal::from(set.reps));
        assert_eq!(set.muscle_group, MuscleGroup::Chest);
        assert!(set.workout_id.starts_with("2024010"));
    }
    // Rest-day gap between the two distinct dates
    assert_eq!(sets[0].rest_days_after, Some(6));
    assert_eq!(sets[3].rest_days_after, None);

    let summary = summarize(&sets).unwrap();
    assert_eq!(summary.total_workouts, 2);
    assert_eq!(summary.total_exercises, 2);
}

// Three bench sessions at 60, 65, 62 kg: the first two set
// weight/volume/1RM records, the third sets nothing.
#[test]
fn test_pr_flags_across_sessions() {
    let sets = dataset_from_csv(&[
        "2024-01-01;Push;Bench Press;1;60;5;;",
        "2024-01-08;Push;Bench Press;1;65;5;;",
        "2024-01-15;Push;Bench Press;1;62;5;;",
    ]);

    assert!(sets[0].pr.weight && sets[0].pr.volume && sets[0].pr.one_rep_max);
    assert!(sets[1].pr.weight && sets[1].pr.volume && sets[1].pr.one_rep_max);
    assert!(!sets[1].pr.reps); // 5 ties 5

    assert!(!sets[2].pr.weight, "62 < 65");
    assert!(!sets[2].pr.volume, "310 < 325");
    assert!(!sets[2].pr.one_rep_max);
    assert!(!sets[2].pr.any);
}

#[test]
fn test_plateau_detection_window() {
    let sets = dataset_from_csv(&[
        "2024-01-01;Legs;Squat;1;100;5;;",
        "2024-01-04;Legs;Squat;1;100;5;;",
        "2024-01-07;Legs;Squat;1;100;5;;",
        "2024-01-10;Legs;Squat;1;100;5;;",
        "2024-01-13;Legs;Squat;1;105;5;;",
    ]);

    let plateaus = detect_plateaus(&sets, "Squat", 3);
    assert_eq!(plateaus.len(), 1);
    assert_eq!(plateaus[0].value, dec!(100));
    assert_eq!(plateaus[0].workout_count, 4);
}

#[test]
fn test_classifier_substring_fallback() {
    // Not an exact dictionary key; matched through the curated names
    assert_eq!(classify("Incline Dumbbell Bench Press"), MuscleGroup::Chest);
}

#[test]
fn test_most_improved_excludes_rare_exercises() {
    let sets = dataset_from_csv(&[
        // Two workouts only, despite tripling the weight
        "2024-01-01;Pull;Deadlift;1;60;5;;",
        "2024-01-20;Pull;Deadlift;1;180;5;;",
        // Three workouts
        "2024-01-01;Push;Bench Press;1;60;5;;",
        "2024-01-08;Push;Bench Press;1;62;5;;",
        "2024-01-15;Push;Bench Press;1;64;5;;",
    ]);

    let ranked = most_improved(&sets, 3, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].exercise_name, "Bench Press");
}

// Chest=100, Shoulders=50, Arms=40, Back=60 gives push 174, pull 76,
// ratio about 2.29: a high-severity push-dominant finding.
#[test]
fn test_balance_push_dominance() {
    let sets = dataset_from_csv(&[
        "2024-01-01;Upper;Bench Press;1;100;1;;",
        "2024-01-01;Upper;Overhead Press;1;50;1;;",
        "2024-01-01;Upper;Bicep Curl;1;40;1;;",
        "2024-01-01;Upper;Barbell Row;1;60;1;;",
    ]);
    // Sanity-check the classifications the numbers depend on
    assert_eq!(sets[0].muscle_group, MuscleGroup::Chest);
    assert_eq!(sets[1].muscle_group, MuscleGroup::Shoulders);
    assert_eq!(sets[2].muscle_group, MuscleGroup::Arms);
    assert_eq!(sets[3].muscle_group, MuscleGroup::Back);

    let report = compute_balance(&sets, &BalanceThresholds::default()).unwrap();
    assert_eq!(report.push_volume, dec!(174));
    assert_eq!(report.pull_volume, dec!(76));
    let ratio = report.push_pull_ratio.unwrap();
    assert!(ratio > dec!(2.2) && ratio < dec!(2.4));

    let finding = report
        .recommendations
        .iter()
        .find(|r| r.message.contains("push-dominant"))
        .unwrap();
    assert_eq!(finding.severity, Severity::High);
}

#[test]
fn test_registry_accumulates_across_imports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");

    let first = dataset_from_csv(&["2024-01-01;Push;Bench Press;1;80;5;;"]);
    let second = dataset_from_csv(&["2024-02-01;Push;Bench Press;1;85;5;;"]);

    {
        let mut registry = RecordsRegistry::load(&path);
        registry.update(&first).unwrap();
    }
    {
        // Reload from disk, fold in the second export
        let mut registry = RecordsRegistry::load(&path);
        let outcome = registry.update(&second).unwrap();
        assert!(outcome.new_records > 0);
    }

    let registry = RecordsRegistry::load(&path);
    let records = registry.get_exercise_records("Bench Press").unwrap();
    assert_eq!(records.max_weight.as_ref().unwrap().value, dec!(85));

    let board = registry.leaderboard(RecordDimension::Weight, 5);
    assert_eq!(board[0].0, "Bench Press");
}

#[test]
fn test_lenient_cells_flow_through_pipeline() {
    // Bodyweight rows and junk numeric cells coerce to 0 and never panic
    let sets = dataset_from_csv(&[
        "2024-01-01;Core;Plank;1;;60;;",
        "2024-01-01;Core;Sit Up;1;n/a;20;;",
    ]);
    assert_eq!(sets[0].weight, Decimal::ZERO);
    assert_eq!(sets[0].volume, Decimal::ZERO);
    assert_eq!(sets[0].one_rep_max, Decimal::ZERO);
    assert!(!sets[0].pr.weight);
    assert_eq!(sets[1].muscle_group, MuscleGroup::Core);

    // Analyzers stay defined on the degenerate data
    assert!(exercise_progression(&sets, "Plank").is_some());
    assert!(compute_balance(&sets, &BalanceThresholds::default()).is_none());
}

#[test]
fn test_missing_columns_surface_as_error() {
    let data = "Date;Exercise Name;Weight (kg)\n2024-01-01;Bench Press;80";
    let err = StrongCsvImporter::new()
        .import_reader(data.as_bytes())
        .unwrap_err();
    let message = err.user_message();
    assert!(message.contains("Workout Name"));
    assert!(message.contains("Reps"));
}
