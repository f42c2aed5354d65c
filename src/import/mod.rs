//! Workout-log import
//!
//! Raw records come out of here type-coerced but otherwise untouched; all
//! derived fields are the enrichment pipeline's job.

pub mod csv;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One raw row of a workout export, after validation and coercion.
///
/// Numeric cells that fail to parse are coerced to 0 (lenient policy for
/// partial exports); dates that fail to parse abort the whole import.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSetRecord {
    pub date: NaiveDate,
    pub workout_name: String,
    pub exercise_name: String,
    /// As exported; re-derived during enrichment, kept only for diagnostics
    pub set_order: u32,
    pub weight: Decimal,
    pub reps: u32,
    pub rpe: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub duration_seconds: Option<Decimal>,
    pub notes: Option<String>,
}

/// Columns that must be present in the export header
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Date",
    "Workout Name",
    "Exercise Name",
    "Set Order",
    "Weight (kg)",
    "Reps",
];
