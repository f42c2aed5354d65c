//! Enrichment pipeline
//!
//! Turns raw import records into [`WorkoutSet`]s with every derived field
//! populated: volume, Brzycki 1RM, muscle group, calendar period keys,
//! re-derived set order, rest-day gaps, and workout ids. Total over its
//! input; no row is dropped.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::import::RawSetRecord;
use crate::models::{MuscleGroup, PrFlags, WorkoutSet};
use crate::muscles;

/// Brzycki one-rep-max estimate.
///
/// `weight * 36 / (37 - reps)` for `0 < reps < 37` and positive weight.
/// The formula diverges as reps approaches 37, so very high rep counts use
/// a flat `weight * 1.1` approximation instead. Zero weight or zero reps
/// yields exactly 0.
pub fn estimate_one_rep_max(weight: Decimal, reps: u32) -> Decimal {
    if reps == 0 || weight <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if reps >= 37 {
        return weight * dec!(1.1);
    }
    weight * Decimal::from(36u32) / Decimal::from(37 - reps)
}

/// Deterministic session key for grouping sets into one workout
pub fn workout_id(date: NaiveDate, workout_name: &str) -> String {
    format!("{}_{}", date.format("%Y%m%d"), workout_name.replace(' ', "_"))
}

/// Enrich raw records into the full analytical dataset.
///
/// Input order is preserved. PR flags come out all-false; run the PR engine
/// over the result to populate them.
pub fn enrich(records: Vec<RawSetRecord>) -> Vec<WorkoutSet> {
    // Rest-day gaps need the sorted distinct workout dates up front
    let distinct_dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
    let sorted_dates: Vec<NaiveDate> = distinct_dates.into_iter().collect();
    let mut rest_days: HashMap<NaiveDate, i64> = HashMap::new();
    for pair in sorted_dates.windows(2) {
        rest_days.insert(pair[0], (pair[1] - pair[0]).num_days() - 1);
    }

    // Exported set order is unreliable; re-derive a 1-based counter per
    // (date, workout, exercise) in input order
    let mut set_counters: HashMap<(NaiveDate, String, String), u32> = HashMap::new();

    let count = records.len();
    let sets: Vec<WorkoutSet> = records
        .into_iter()
        .map(|record| {
            let counter = set_counters
                .entry((
                    record.date,
                    record.workout_name.clone(),
                    record.exercise_name.clone(),
                ))
                .or_insert(0);
            *counter += 1;

            let iso = record.date.iso_week();
            let volume = record.weight * Decimal::from(record.reps);

            WorkoutSet {
                muscle_group: muscles::classify(&record.exercise_name),
                volume,
                one_rep_max: estimate_one_rep_max(record.weight, record.reps),
                year: record.date.year(),
                month: record.date.month(),
                week: iso.week(),
                weekday: record.date.format("%A").to_string(),
                year_month: record.date.format("%Y-%m").to_string(),
                year_week: format!("{}-W{:02}", iso.year(), iso.week()),
                rest_days_after: rest_days.get(&record.date).copied(),
                workout_id: workout_id(record.date, &record.workout_name),
                set_order: *counter,
                pr: PrFlags::default(),
                date: record.date,
                workout_name: record.workout_name,
                exercise_name: record.exercise_name,
                weight: record.weight,
                reps: record.reps,
                rpe: record.rpe,
                distance: record.distance,
                duration_seconds: record.duration_seconds,
                notes: record.notes,
            }
        })
        .collect();

    tracing::info!(rows = count, "enrichment complete");
    sets
}

/// Headline metadata about an enriched dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub date_range_days: i64,
    pub total_sets: usize,
    pub total_workouts: usize,
    pub total_exercises: usize,
    pub total_muscle_groups: usize,
    pub total_volume: Decimal,
    pub avg_volume_per_workout: Decimal,
    /// Over sets with weight > 0
    pub max_weight: Decimal,
    pub avg_weight: Decimal,
    /// Over sets with reps > 0
    pub max_reps: u32,
    pub avg_reps: Decimal,
    pub avg_rpe: Option<Decimal>,
    pub avg_workout_duration_seconds: Option<Decimal>,
}

/// Summarize an enriched dataset. Returns `None` for an empty input.
pub fn summarize(sets: &[WorkoutSet]) -> Option<DatasetSummary> {
    let start_date = sets.iter().map(|s| s.date).min()?;
    let end_date = sets.iter().map(|s| s.date).max()?;

    let workout_ids: BTreeSet<&str> = sets.iter().map(|s| s.workout_id.as_str()).collect();
    let exercises: BTreeSet<&str> = sets.iter().map(|s| s.exercise_name.as_str()).collect();
    let muscle_groups: BTreeSet<MuscleGroup> = sets.iter().map(|s| s.muscle_group).collect();
    let total_volume: Decimal = sets.iter().map(|s| s.volume).sum();

    let weights: Vec<Decimal> = sets
        .iter()
        .filter(|s| s.weight > Decimal::ZERO)
        .map(|s| s.weight)
        .collect();
    let reps: Vec<u32> = sets.iter().filter(|s| s.reps > 0).map(|s| s.reps).collect();
    let rpes: Vec<Decimal> = sets
        .iter()
        .filter_map(|s| s.rpe)
        .filter(|r| *r > Decimal::ZERO)
        .collect();

    // Duration is exported per workout, repeated on each set; take the
    // first value per session
    let mut durations: Vec<Decimal> = Vec::new();
    let mut seen = BTreeSet::new();
    for set in sets {
        if seen.insert(set.workout_id.as_str()) {
            if let Some(d) = set.duration_seconds.filter(|d| *d > Decimal::ZERO) {
                durations.push(d);
            }
        }
    }

    let mean = |values: &[Decimal]| -> Decimal {
        if values.is_empty() {
            Decimal::ZERO
        } else {
            values.iter().sum::<Decimal>() / Decimal::from(values.len())
        }
    };

    let workout_count = workout_ids.len();
    Some(DatasetSummary {
        start_date,
        end_date,
        date_range_days: (end_date - start_date).num_days() + 1,
        total_sets: sets.len(),
        total_workouts: workout_count,
        total_exercises: exercises.len(),
        total_muscle_groups: muscle_groups.len(),
        total_volume,
        avg_volume_per_workout: if workout_count > 0 {
            total_volume / Decimal::from(workout_count)
        } else {
            Decimal::ZERO
        },
        max_weight: weights.iter().copied().max().unwrap_or(Decimal::ZERO),
        avg_weight: mean(&weights),
        max_reps: reps.iter().copied().max().unwrap_or(0),
        avg_reps: if reps.is_empty() {
            Decimal::ZERO
        } else {
            reps.iter().map(|r| Decimal::from(*r)).sum::<Decimal>() / Decimal::from(reps.len())
        },
        avg_rpe: if rpes.is_empty() { None } else { Some(mean(&rpes)) },
        avg_workout_duration_seconds: if durations.is_empty() {
            None
        } else {
            Some(mean(&durations))
        },
    })
}

/// Training rep ranges for volume distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RepRange {
    /// 1-5 reps
    Strength,
    /// 6-8 reps
    HypertrophyStrength,
    /// 9-12 reps
    Hypertrophy,
    /// 13-15 reps
    HypertrophyEndurance,
    /// 16+ reps
    Endurance,
}

impl RepRange {
    pub fn from_reps(reps: u32) -> Self {
        match reps {
            0..=5 => RepRange::Strength,
            6..=8 => RepRange::HypertrophyStrength,
            9..=12 => RepRange::Hypertrophy,
            13..=15 => RepRange::HypertrophyEndurance,
            _ => RepRange::Endurance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepRange::Strength => "Strength (1-5)",
            RepRange::HypertrophyStrength => "Hypertrophy-Strength (6-8)",
            RepRange::Hypertrophy => "Hypertrophy (9-12)",
            RepRange::HypertrophyEndurance => "Hypertrophy-Endurance (13-15)",
            RepRange::Endurance => "Endurance (16+)",
        }
    }
}

/// Volume share per rep range, as percentages of total volume.
/// Empty when the dataset has no volume.
pub fn volume_by_rep_range(sets: &[WorkoutSet]) -> Vec<(RepRange, Decimal)> {
    let mut by_range: HashMap<RepRange, Decimal> = HashMap::new();
    for set in sets {
        *by_range.entry(RepRange::from_reps(set.reps)).or_default() += set.volume;
    }
    let total: Decimal = by_range.values().copied().sum();
    if total <= Decimal::ZERO {
        return Vec::new();
    }
    let mut shares: Vec<(RepRange, Decimal)> = by_range
        .into_iter()
        .map(|(range, volume)| (range, volume / total * dec!(100)))
        .collect();
    shares.sort_by_key(|(range, _)| *range);
    shares
}

/// Average training intensity as a share of each exercise's best
/// estimated 1RM
#[derive(Debug, Clone, PartialEq)]
pub struct IntensitySummary {
    /// Mean %1RM across all weighted sets
    pub avg_intensity_pct: Decimal,
    /// Mean %1RM per muscle group
    pub by_muscle_group: BTreeMap<MuscleGroup, Decimal>,
}

/// Average %-of-1RM intensity, overall and per muscle group.
///
/// Each set scores `weight / best 1RM of its exercise * 100`. Sets without
/// a positive weight, or whose exercise has no 1RM estimate at all, are
/// skipped. `None` when no set qualifies.
pub fn intensity_summary(sets: &[WorkoutSet]) -> Option<IntensitySummary> {
    let mut best_one_rep_max: HashMap<&str, Decimal> = HashMap::new();
    for set in sets {
        let best = best_one_rep_max
            .entry(set.exercise_name.as_str())
            .or_default();
        if set.one_rep_max > *best {
            *best = set.one_rep_max;
        }
    }

    let mut total = Decimal::ZERO;
    let mut count = 0u32;
    let mut group_sums: BTreeMap<MuscleGroup, (Decimal, u32)> = BTreeMap::new();
    for set in sets {
        let best = best_one_rep_max[set.exercise_name.as_str()];
        if set.weight <= Decimal::ZERO || best <= Decimal::ZERO {
            continue;
        }
        let pct = set.weight / best * dec!(100);
        total += pct;
        count += 1;
        let entry = group_sums
            .entry(set.muscle_group)
            .or_insert((Decimal::ZERO, 0));
        entry.0 += pct;
        entry.1 += 1;
    }
    if count == 0 {
        return None;
    }

    Some(IntensitySummary {
        avg_intensity_pct: total / Decimal::from(count),
        by_muscle_group: group_sums
            .into_iter()
            .map(|(group, (sum, n))| (group, sum / Decimal::from(n)))
            .collect(),
    })
}

/// Criteria for narrowing an enriched dataset before analysis
#[derive(Debug, Clone, Default)]
pub struct DatasetFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub muscle_groups: Vec<MuscleGroup>,
    pub exercises: Vec<String>,
    pub min_weight: Option<Decimal>,
    pub max_weight: Option<Decimal>,
    pub min_reps: Option<u32>,
    pub max_reps: Option<u32>,
    pub only_prs: bool,
}

/// Apply filter criteria, preserving order
pub fn filter(sets: &[WorkoutSet], criteria: &DatasetFilter) -> Vec<WorkoutSet> {
    sets.iter()
        .filter(|s| criteria.start_date.map_or(true, |d| s.date >= d))
        .filter(|s| criteria.end_date.map_or(true, |d| s.date <= d))
        .filter(|s| {
            criteria.muscle_groups.is_empty() || criteria.muscle_groups.contains(&s.muscle_group)
        })
        .filter(|s| criteria.exercises.is_empty() || criteria.exercises.contains(&s.exercise_name))
        .filter(|s| criteria.min_weight.map_or(true, |w| s.weight >= w))
        .filter(|s| criteria.max_weight.map_or(true, |w| s.weight <= w))
        .filter(|s| criteria.min_reps.map_or(true, |r| s.reps >= r))
        .filter(|s| criteria.max_reps.map_or(true, |r| s.reps <= r))
        .filter(|s| !criteria.only_prs || s.pr.any)
        .cloned()
        .collect()
}
