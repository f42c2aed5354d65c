//! Push/pull and upper/lower balance analysis
//!
//! Volume-based structural balance scoring with qualitative
//! recommendations. Arm volume splits 60/40 between push and pull, since
//! triceps-heavy pressing work and biceps-heavy pulling work both land in
//! the Arms group.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::models::{MuscleGroup, WorkoutSet};

/// Tunable ratio thresholds for recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceThresholds {
    /// Push/pull ratio above this is push-dominant
    pub push_dominant: Decimal,
    /// Push/pull ratio above this escalates to high severity
    pub push_dominant_high: Decimal,
    /// Push/pull ratio below this is pull-dominant
    pub pull_dominant: Decimal,
    /// Push/pull ratio below this escalates to high severity
    pub pull_dominant_high: Decimal,
    /// Upper/lower ratio above this flags neglected legs
    pub upper_dominant: Decimal,
    /// Upper/lower ratio above this escalates to high severity
    pub upper_dominant_high: Decimal,
    /// Upper/lower ratio below this flags neglected upper body
    pub lower_dominant: Decimal,
    /// Upper/lower ratio below this escalates to high severity
    pub lower_dominant_high: Decimal,
    /// Minimum core share of total volume, percent
    pub min_core_share: Decimal,
    /// Minimum share for each of Shoulders/Back/Legs, percent
    pub min_group_share: Decimal,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        BalanceThresholds {
            push_dominant: dec!(1.3),
            push_dominant_high: dec!(1.6),
            pull_dominant: dec!(0.7),
            pull_dominant_high: dec!(0.4),
            upper_dominant: dec!(2.0),
            upper_dominant_high: dec!(3.0),
            lower_dominant: dec!(0.5),
            lower_dominant_high: dec!(0.3),
            min_core_share: dec!(5),
            min_group_share: dec!(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Moderate,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Moderate => f.write_str("moderate"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// One qualitative imbalance finding
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
}

/// Balance analysis over a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    /// Total volume per muscle group (only groups with volume appear)
    pub muscle_volume: BTreeMap<MuscleGroup, Decimal>,
    /// Share of total volume per muscle group, percent
    pub muscle_percentage: BTreeMap<MuscleGroup, Decimal>,
    pub push_volume: Decimal,
    pub pull_volume: Decimal,
    /// None when pull volume is 0 (undefined/infinite)
    pub push_pull_ratio: Option<Decimal>,
    /// None when leg volume is 0
    pub upper_lower_ratio: Option<Decimal>,
    /// Core share of total volume, percent
    pub core_share: Decimal,
    pub recommendations: Vec<Recommendation>,
    pub is_balanced: bool,
}

/// Analyze structural balance. `None` when the dataset carries no volume.
pub fn compute_balance(sets: &[WorkoutSet], thresholds: &BalanceThresholds) -> Option<BalanceReport> {
    let mut muscle_volume: BTreeMap<MuscleGroup, Decimal> = BTreeMap::new();
    for set in sets {
        *muscle_volume.entry(set.muscle_group).or_default() += set.volume;
    }
    muscle_volume.retain(|_, volume| *volume > Decimal::ZERO);

    let total: Decimal = muscle_volume.values().copied().sum();
    if total <= Decimal::ZERO {
        return None;
    }

    let volume_of = |group: MuscleGroup| muscle_volume.get(&group).copied().unwrap_or_default();
    let muscle_percentage: BTreeMap<MuscleGroup, Decimal> = muscle_volume
        .iter()
        .map(|(group, volume)| (*group, volume / total * dec!(100)))
        .collect();

    let arms = volume_of(MuscleGroup::Arms);
    let push_volume = volume_of(MuscleGroup::Chest) + volume_of(MuscleGroup::Shoulders) + arms * dec!(0.6);
    let pull_volume = volume_of(MuscleGroup::Back) + arms * dec!(0.4);
    let legs_volume = volume_of(MuscleGroup::Legs);

    let push_pull_ratio = if pull_volume > Decimal::ZERO {
        Some(push_volume / pull_volume)
    } else {
        None
    };
    let upper_lower_ratio = if legs_volume > Decimal::ZERO {
        Some((push_volume + pull_volume) / legs_volume)
    } else {
        None
    };
    let core_share = volume_of(MuscleGroup::Core) / total * dec!(100);

    let mut recommendations = Vec::new();

    match push_pull_ratio {
        Some(ratio) if ratio > thresholds.push_dominant => {
            let severity = if ratio > thresholds.push_dominant_high {
                Severity::High
            } else {
                Severity::Moderate
            };
            recommendations.push(Recommendation {
                severity,
                message: format!(
                    "Training is push-dominant (push/pull ratio {:.2}). Add more pulling work such as rows and pull-ups.",
                    ratio
                ),
            });
        }
        Some(ratio) if ratio < thresholds.pull_dominant => {
            let severity = if ratio < thresholds.pull_dominant_high {
                Severity::High
            } else {
                Severity::Moderate
            };
            recommendations.push(Recommendation {
                severity,
                message: format!(
                    "Training is pull-dominant (push/pull ratio {:.2}). Add more pressing work such as bench press and overhead press.",
                    ratio
                ),
            });
        }
        Some(_) => {}
        // No pull volume at all: the most extreme push dominance
        None if push_volume > Decimal::ZERO => {
            recommendations.push(Recommendation {
                severity: Severity::High,
                message:
                    "No pulling volume recorded. Add rows and pull-ups to balance the pressing work."
                        .to_string(),
            });
        }
        None => {}
    }

    match upper_lower_ratio {
        Some(ratio) if ratio > thresholds.upper_dominant => {
            let severity = if ratio > thresholds.upper_dominant_high {
                Severity::High
            } else {
                Severity::Moderate
            };
            recommendations.push(Recommendation {
                severity,
                message: format!(
                    "Upper body dominates (upper/lower ratio {:.2}). Add more leg work such as squats and deadlifts.",
                    ratio
                ),
            });
        }
        Some(ratio) if ratio < thresholds.lower_dominant => {
            let severity = if ratio < thresholds.lower_dominant_high {
                Severity::High
            } else {
                Severity::Moderate
            };
            recommendations.push(Recommendation {
                severity,
                message: format!(
                    "Lower body dominates (upper/lower ratio {:.2}). Add more upper-body work.",
                    ratio
                ),
            });
        }
        Some(_) => {}
        None if push_volume + pull_volume > Decimal::ZERO => {
            recommendations.push(Recommendation {
                severity: Severity::High,
                message: "No leg volume recorded. Add squats, deadlifts, or lunges.".to_string(),
            });
        }
        None => {}
    }

    if core_share < thresholds.min_core_share {
        recommendations.push(Recommendation {
            severity: Severity::Moderate,
            message: format!(
                "Core volume is only {:.1}% of training. Add planks, ab wheel, or hanging leg raises.",
                core_share
            ),
        });
    }

    for group in [MuscleGroup::Shoulders, MuscleGroup::Back, MuscleGroup::Legs] {
        let share = muscle_percentage.get(&group).copied().unwrap_or_default();
        if share < thresholds.min_group_share {
            recommendations.push(Recommendation {
                severity: Severity::Moderate,
                message: format!(
                    "{} volume is low ({:.1}% of training). Consider dedicating more sets to it.",
                    group, share
                ),
            });
        }
    }

    let is_balanced = recommendations.is_empty();
    Some(BalanceReport {
        muscle_volume,
        muscle_percentage,
        push_volume,
        pull_volume,
        push_pull_ratio,
        upper_lower_ratio,
        core_share,
        recommendations,
        is_balanced,
    })
}
