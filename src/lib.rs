//! GymRS - workout-log analytics
//!
//! Turns a tabular workout export into an enriched dataset with derived
//! metrics (volume, estimated 1RM, muscle groups, personal-record flags)
//! and runs progression, plateau, balance, and habit analyses over it. A
//! small JSON registry accumulates best-ever records across imports.

pub mod balance;
pub mod config;
pub mod enrich;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod muscles;
pub mod patterns;
pub mod progression;
pub mod prs;
pub mod registry;

pub use error::{GymRsError, Result};
pub use models::{MuscleGroup, PrFlags, WorkoutSet};

/// Import, enrich, and PR-flag a workout export in one step
pub fn load_dataset(
    path: &std::path::Path,
    separator: u8,
) -> Result<Vec<WorkoutSet>> {
    let records = import::csv::StrongCsvImporter::with_separator(separator).import_file(path)?;
    Ok(prs::flag_personal_records(enrich::enrich(records)))
}
