use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Muscle group taxonomy used for exercise classification and aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    Olympic,
    Cardio,
    Compound,
    Other,
}

impl MuscleGroup {
    /// All groups, in a stable display order
    pub const ALL: [MuscleGroup; 10] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Legs,
        MuscleGroup::Core,
        MuscleGroup::Olympic,
        MuscleGroup::Cardio,
        MuscleGroup::Compound,
        MuscleGroup::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Core => "Core",
            MuscleGroup::Olympic => "Olympic",
            MuscleGroup::Cardio => "Cardio",
            MuscleGroup::Compound => "Compound",
            MuscleGroup::Other => "Other",
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "arms" => Ok(MuscleGroup::Arms),
            "legs" => Ok(MuscleGroup::Legs),
            "core" => Ok(MuscleGroup::Core),
            "olympic" => Ok(MuscleGroup::Olympic),
            "cardio" => Ok(MuscleGroup::Cardio),
            "compound" => Ok(MuscleGroup::Compound),
            "other" => Ok(MuscleGroup::Other),
            _ => Err(format!("Unknown muscle group: {}", s)),
        }
    }
}

/// Personal-record flags for a single set
///
/// A dimension is flagged when the set's value strictly exceeds every
/// earlier value for the same exercise. Populated by the PR engine; always
/// false straight out of enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrFlags {
    pub weight: bool,
    pub reps: bool,
    pub volume: bool,
    pub one_rep_max: bool,
    pub any: bool,
}

/// One set of one exercise: the atomic unit of the enriched dataset
///
/// Created once from a raw input row by the enrichment pipeline and never
/// mutated afterwards (the PR engine produces a new collection with flags
/// populated). Every derived field is recomputed during enrichment; none is
/// trusted from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Calendar date of the workout (time-of-day not significant)
    pub date: NaiveDate,

    /// Free-text session label from the export
    pub workout_name: String,

    /// Free-text exercise label from the export
    pub exercise_name: String,

    /// 1-based position within (date, workout, exercise), re-derived
    pub set_order: u32,

    /// Weight in kilograms; 0 for bodyweight sets
    pub weight: Decimal,

    /// Repetitions performed
    pub reps: u32,

    /// Rate of perceived exertion (0-10), when exported
    pub rpe: Option<Decimal>,

    /// Distance in meters, for cardio-style entries
    pub distance: Option<Decimal>,

    /// Set or workout duration in seconds, when exported
    pub duration_seconds: Option<Decimal>,

    /// Free-text set notes
    pub notes: Option<String>,

    /// Classified muscle group; falls back to Other, never absent
    pub muscle_group: MuscleGroup,

    /// weight * reps, always recomputed
    pub volume: Decimal,

    /// Brzycki estimated one-rep max; 0 when undefined
    pub one_rep_max: Decimal,

    /// Calendar year
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,

    /// ISO week number (1-53)
    pub week: u32,

    /// Day-of-week name ("Monday".."Sunday")
    pub weekday: String,

    /// Period key YYYY-MM
    pub year_month: String,

    /// Period key YYYY-Www (ISO week)
    pub year_week: String,

    /// Full rest days until the next distinct workout date; None on the
    /// last date in the dataset
    pub rest_days_after: Option<i64>,

    /// Deterministic session key: date + workout name
    pub workout_id: String,

    /// Personal-record flags
    pub pr: PrFlags,
}

impl WorkoutSet {
    /// True when the set carries meaningful load (weight and reps nonzero)
    pub fn is_working_set(&self) -> bool {
        self.weight > Decimal::ZERO && self.reps > 0
    }
}
