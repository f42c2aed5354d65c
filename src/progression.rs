//! Progression analysis
//!
//! Read-only aggregations over the enriched, PR-flagged dataset: single
//! exercise progression, plateau detection, most-improved ranking, and
//! period-bucketed trend series. Sparse data is the common case, so every
//! function here returns an empty or `None` result instead of failing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::models::WorkoutSet;

/// Percent change from `first` to `last`, guarded: 0 when `first` is 0.
pub fn percent_change(first: Decimal, last: Decimal) -> Decimal {
    if first == Decimal::ZERO {
        Decimal::ZERO
    } else {
        (last - first) / first * dec!(100)
    }
}

/// Granularity for trend bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Bucket key for a set. Keys sort chronologically as strings.
    fn key(&self, set: &WorkoutSet) -> String {
        match self {
            Period::Week => set.year_week.clone(),
            Period::Month => set.year_month.clone(),
            Period::Year => set.year.to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            "year" | "yearly" => Ok(Period::Year),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

/// Per-date aggregate for one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionPoint {
    pub date: NaiveDate,
    pub max_weight: Decimal,
    pub max_reps: u32,
    pub total_volume: Decimal,
    pub max_one_rep_max: Decimal,
}

/// Best observed value of one metric and when it happened
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBest {
    pub value: Decimal,
    pub date: NaiveDate,
}

/// Progression summary for a single exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgression {
    pub exercise_name: String,
    /// One point per distinct workout date, chronological
    pub points: Vec<ProgressionPoint>,
    pub weight_change_pct: Decimal,
    pub volume_change_pct: Decimal,
    pub one_rep_max_change_pct: Decimal,
    /// Average weight gain per workout, (last - first) / (count - 1);
    /// zero with a single workout
    pub avg_weight_change_per_workout: Decimal,
    pub best_weight: MetricBest,
    pub best_volume: MetricBest,
    pub best_one_rep_max: MetricBest,
}

/// Group an exercise's sets by date, chronologically
fn daily_points(sets: &[WorkoutSet], exercise_name: &str) -> Vec<ProgressionPoint> {
    let mut by_date: BTreeMap<NaiveDate, ProgressionPoint> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.exercise_name == exercise_name) {
        let point = by_date.entry(set.date).or_insert(ProgressionPoint {
            date: set.date,
            max_weight: Decimal::ZERO,
            max_reps: 0,
            total_volume: Decimal::ZERO,
            max_one_rep_max: Decimal::ZERO,
        });
        point.max_weight = point.max_weight.max(set.weight);
        point.max_reps = point.max_reps.max(set.reps);
        point.total_volume += set.volume;
        point.max_one_rep_max = point.max_one_rep_max.max(set.one_rep_max);
    }
    by_date.into_values().collect()
}

/// First date achieving the series maximum
fn best_of(points: &[ProgressionPoint], metric: impl Fn(&ProgressionPoint) -> Decimal) -> MetricBest {
    let mut best = MetricBest {
        value: Decimal::ZERO,
        date: points[0].date,
    };
    for point in points {
        let value = metric(point);
        if value > best.value {
            best = MetricBest {
                value,
                date: point.date,
            };
        }
    }
    best
}

/// Analyze one exercise's progression over time. `None` when the exercise
/// does not appear in the dataset.
pub fn exercise_progression(sets: &[WorkoutSet], exercise_name: &str) -> Option<ExerciseProgression> {
    let points = daily_points(sets, exercise_name);
    if points.is_empty() {
        return None;
    }

    let first = &points[0];
    let last = &points[points.len() - 1];
    let count = points.len();

    let avg_weight_change_per_workout = if count > 1 {
        (last.max_weight - first.max_weight) / Decimal::from(count - 1)
    } else {
        Decimal::ZERO
    };

    Some(ExerciseProgression {
        exercise_name: exercise_name.to_string(),
        weight_change_pct: percent_change(first.max_weight, last.max_weight),
        volume_change_pct: percent_change(first.total_volume, last.total_volume),
        one_rep_max_change_pct: percent_change(first.max_one_rep_max, last.max_one_rep_max),
        avg_weight_change_per_workout,
        best_weight: best_of(&points, |p| p.max_weight),
        best_volume: best_of(&points, |p| p.total_volume),
        best_one_rep_max: best_of(&points, |p| p.max_one_rep_max),
        points,
    })
}

/// A run of workouts with no new top weight
#[derive(Debug, Clone, PartialEq)]
pub struct Plateau {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// The weight the exercise was stuck at
    pub value: Decimal,
    pub workout_count: usize,
}

/// Detect plateaus for one exercise: maximal runs of `window` or more
/// consecutive workout dates where the daily top weight never exceeds the
/// weight that opened the run. A strictly heavier workout ends the run and
/// opens a new one at the heavier value.
pub fn detect_plateaus(sets: &[WorkoutSet], exercise_name: &str, window: usize) -> Vec<Plateau> {
    let points = daily_points(sets, exercise_name);
    if window == 0 || points.len() < window {
        return Vec::new();
    }

    let mut plateaus = Vec::new();
    let mut run_start = 0usize;
    let mut run_value = points[0].max_weight;

    let close_run = |start: usize, end: usize, value: Decimal, out: &mut Vec<Plateau>| {
        let count = end - start + 1;
        if count >= window {
            out.push(Plateau {
                start_date: points[start].date,
                end_date: points[end].date,
                value,
                workout_count: count,
            });
        }
    };

    for (i, point) in points.iter().enumerate().skip(1) {
        if point.max_weight > run_value {
            close_run(run_start, i - 1, run_value, &mut plateaus);
            run_start = i;
            run_value = point.max_weight;
        }
    }
    close_run(run_start, points.len() - 1, run_value, &mut plateaus);

    plateaus
}

/// One entry of the most-improved ranking
#[derive(Debug, Clone, PartialEq)]
pub struct ImprovedExercise {
    pub exercise_name: String,
    pub workout_count: usize,
    pub weight_change_pct: Decimal,
    pub volume_change_pct: Decimal,
    pub one_rep_max_change_pct: Decimal,
    /// Mean of the three percent changes
    pub overall_improvement_pct: Decimal,
}

/// Rank exercises by improvement from first to last workout.
///
/// Only exercises with at least `min_occurrences` distinct workout dates
/// qualify; a two-workout exercise never ranks no matter how large its jump.
pub fn most_improved(
    sets: &[WorkoutSet],
    min_occurrences: usize,
    top_n: usize,
) -> Vec<ImprovedExercise> {
    let mut names: Vec<&str> = sets.iter().map(|s| s.exercise_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    let mut ranked: Vec<ImprovedExercise> = names
        .into_iter()
        .filter_map(|name| {
            let points = daily_points(sets, name);
            if points.len() < min_occurrences {
                return None;
            }
            let first = &points[0];
            let last = &points[points.len() - 1];
            let weight = percent_change(first.max_weight, last.max_weight);
            let volume = percent_change(first.total_volume, last.total_volume);
            let one_rep_max = percent_change(first.max_one_rep_max, last.max_one_rep_max);
            Some(ImprovedExercise {
                exercise_name: name.to_string(),
                workout_count: points.len(),
                weight_change_pct: weight,
                volume_change_pct: volume,
                one_rep_max_change_pct: one_rep_max,
                overall_improvement_pct: (weight + volume + one_rep_max) / dec!(3),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.overall_improvement_pct
            .cmp(&a.overall_improvement_pct)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });
    ranked.truncate(top_n);
    ranked
}

/// One bucket of a period trend series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Period key: YYYY-Www, YYYY-MM, or YYYY
    pub period: String,
    pub value: Decimal,
    /// Trailing average over up to 3 periods including this one
    pub rolling_avg: Decimal,
    /// Change from the previous period; 0 for the first period
    pub change_pct: Decimal,
}

fn trend_series(buckets: BTreeMap<String, Decimal>) -> Vec<TrendPoint> {
    let values: Vec<(String, Decimal)> = buckets.into_iter().collect();
    values
        .iter()
        .enumerate()
        .map(|(i, (period, value))| {
            let window_start = i.saturating_sub(2);
            let window = &values[window_start..=i];
            let rolling_avg =
                window.iter().map(|(_, v)| *v).sum::<Decimal>() / Decimal::from(window.len());
            let change_pct = if i == 0 {
                Decimal::ZERO
            } else {
                percent_change(values[i - 1].1, *value)
            };
            TrendPoint {
                period: period.clone(),
                value: *value,
                rolling_avg,
                change_pct,
            }
        })
        .collect()
}

/// Total volume per period
pub fn volume_trend(sets: &[WorkoutSet], period: Period) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for set in sets {
        *buckets.entry(period.key(set)).or_default() += set.volume;
    }
    trend_series(buckets)
}

/// Count of PR sets per period
pub fn pr_frequency_trend(sets: &[WorkoutSet], period: Period) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for set in sets {
        let bucket = buckets.entry(period.key(set)).or_default();
        if set.pr.any {
            *bucket += Decimal::ONE;
        }
    }
    trend_series(buckets)
}

/// Metric averaged by the strength trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthMetric {
    Weight,
    OneRepMax,
}

/// Mean weight or estimated 1RM per period
pub fn strength_trend(sets: &[WorkoutSet], period: Period, metric: StrengthMetric) -> Vec<TrendPoint> {
    let mut sums: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();
    for set in sets {
        let value = match metric {
            StrengthMetric::Weight => set.weight,
            StrengthMetric::OneRepMax => set.one_rep_max,
        };
        let entry = sums.entry(period.key(set)).or_insert((Decimal::ZERO, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    let buckets: BTreeMap<String, Decimal> = sums
        .into_iter()
        .map(|(period, (sum, count))| (period, sum / Decimal::from(count)))
        .collect();
    trend_series(buckets)
}
