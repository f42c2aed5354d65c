//! Workout-frequency and habit statistics
//!
//! Everything here works off the distinct workout dates of the dataset:
//! weekly frequency, streaks, weekday habits, and the split-half
//! comparison of the earlier vs the later part of the training history.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::WorkoutSet;
use crate::progression::percent_change;

/// Frequency and consistency statistics over the whole dataset
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPatterns {
    /// Distinct workout dates
    pub total_workouts: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub date_range_days: i64,
    pub avg_workouts_per_week: Decimal,
    /// Longest run of calendar-consecutive workout dates; 1 when workouts
    /// exist but never on consecutive days
    pub longest_streak: usize,
    pub most_common_weekday: String,
    /// Workday density: workouts / days in range, in [0, 1]
    pub consistency: Decimal,
    /// Mean full rest days between consecutive workout dates; None with
    /// fewer than two dates
    pub avg_rest_days: Option<Decimal>,
}

/// Compute frequency statistics. `None` for an empty dataset.
pub fn workout_patterns(sets: &[WorkoutSet]) -> Option<WorkoutPatterns> {
    let dates: BTreeSet<NaiveDate> = sets.iter().map(|s| s.date).collect();
    if dates.is_empty() {
        return None;
    }
    let dates: Vec<NaiveDate> = dates.into_iter().collect();

    let start_date = dates[0];
    let end_date = dates[dates.len() - 1];
    let date_range_days = (end_date - start_date).num_days() + 1;
    let total_workouts = dates.len();

    let mut longest_streak = 1usize;
    let mut current_streak = 1usize;
    for pair in dates.windows(2) {
        if pair[1] - pair[0] == Duration::days(1) {
            current_streak += 1;
            longest_streak = longest_streak.max(current_streak);
        } else {
            current_streak = 1;
        }
    }

    let mut weekday_counts: BTreeMap<String, usize> = BTreeMap::new();
    for date in &dates {
        *weekday_counts
            .entry(date.format("%A").to_string())
            .or_default() += 1;
    }
    // Max by count; BTreeMap iteration makes ties deterministic
    let most_common_weekday = weekday_counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(day, _)| day.clone())
        .unwrap_or_default();

    let avg_rest_days = if dates.len() > 1 {
        let gaps: i64 = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days() - 1)
            .sum();
        Some(Decimal::from(gaps) / Decimal::from(dates.len() as u64 - 1))
    } else {
        None
    };

    Some(WorkoutPatterns {
        total_workouts,
        start_date,
        end_date,
        date_range_days,
        avg_workouts_per_week: Decimal::from(total_workouts as u64) * dec!(7)
            / Decimal::from(date_range_days),
        longest_streak,
        most_common_weekday,
        consistency: Decimal::from(total_workouts as u64) / Decimal::from(date_range_days),
        avg_rest_days,
    })
}

/// Aggregates for one half of the split-half comparison
#[derive(Debug, Clone, PartialEq)]
pub struct HalfStats {
    pub total_volume: Decimal,
    pub pr_count: usize,
    pub mean_weight: Decimal,
}

fn half_stats(sets: &[&WorkoutSet]) -> HalfStats {
    let total_volume = sets.iter().map(|s| s.volume).sum();
    let pr_count = sets.iter().filter(|s| s.pr.any).count();
    let mean_weight = if sets.is_empty() {
        Decimal::ZERO
    } else {
        sets.iter().map(|s| s.weight).sum::<Decimal>() / Decimal::from(sets.len())
    };
    HalfStats {
        total_volume,
        pr_count,
        mean_weight,
    }
}

/// Earlier half vs later half of the training history
#[derive(Debug, Clone, PartialEq)]
pub struct SplitHalfComparison {
    /// Last date included in the first half
    pub midpoint: NaiveDate,
    pub first: HalfStats,
    pub second: HalfStats,
    /// Second half vs first half; 0 when the first-half value is 0
    pub volume_change_pct: Decimal,
    pub pr_count_change_pct: Decimal,
    pub mean_weight_change_pct: Decimal,
}

/// Split the dataset chronologically at the midpoint date and compare the
/// halves. `None` when the dataset spans fewer than two distinct dates.
pub fn split_half_comparison(sets: &[WorkoutSet]) -> Option<SplitHalfComparison> {
    let start = sets.iter().map(|s| s.date).min()?;
    let end = sets.iter().map(|s| s.date).max()?;
    if start == end {
        return None;
    }

    let midpoint = start + Duration::days((end - start).num_days() / 2);
    let first: Vec<&WorkoutSet> = sets.iter().filter(|s| s.date <= midpoint).collect();
    let second: Vec<&WorkoutSet> = sets.iter().filter(|s| s.date > midpoint).collect();

    let first = half_stats(&first);
    let second = half_stats(&second);

    Some(SplitHalfComparison {
        midpoint,
        volume_change_pct: percent_change(first.total_volume, second.total_volume),
        pr_count_change_pct: percent_change(
            Decimal::from(first.pr_count as u64),
            Decimal::from(second.pr_count as u64),
        ),
        mean_weight_change_pct: percent_change(first.mean_weight, second.mean_weight),
        first,
        second,
    })
}
