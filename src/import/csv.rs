//! Strong-app CSV import
//!
//! Parses the tabular export, validates the header, and coerces cell
//! values. Structural problems (missing columns, bad dates) fail the whole
//! import; cell-level numeric problems coerce to 0 and are logged.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{IngestError, Result};
use crate::import::{RawSetRecord, REQUIRED_COLUMNS};

/// CSV importer for Strong-style workout exports
pub struct StrongCsvImporter {
    separator: u8,
}

impl StrongCsvImporter {
    pub fn new() -> Self {
        StrongCsvImporter { separator: b';' }
    }

    /// Use a non-default field separator (the export format varies by app
    /// version; comma and semicolon both occur in the wild)
    pub fn with_separator(separator: u8) -> Self {
        StrongCsvImporter { separator }
    }

    /// Import a workout export from a file path
    pub fn import_file(&self, path: &Path) -> Result<Vec<RawSetRecord>> {
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import a workout export from any reader
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<Vec<RawSetRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.separator)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| IngestError::Malformed {
                reason: e.to_string(),
            })?
            .clone();

        // Strip stray quotes some export versions leave in the header row
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().replace('"', ""), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !columns.contains_key(**col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::error!(columns = ?missing, "export is missing required columns");
            return Err(IngestError::MissingColumns { columns: missing }.into());
        }

        let col = |name: &str| columns[name];
        let date_col = col("Date");
        let workout_col = col("Workout Name");
        let exercise_col = col("Exercise Name");
        let set_order_col = col("Set Order");
        let weight_col = col("Weight (kg)");
        let reps_col = col("Reps");
        let rpe_col = columns.get("RPE").copied();
        let distance_col = columns.get("Distance (meters)").copied();
        // Both spellings occur across export versions
        let duration_col = columns
            .get("Duration (sec)")
            .or_else(|| columns.get("Seconds"))
            .copied();
        let notes_col = columns.get("Notes").copied();

        let mut records = Vec::new();

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| IngestError::Malformed {
                reason: e.to_string(),
            })?;
            let row = row_idx + 2; // 1-based, after the header

            let field = |i: usize| record.get(i).unwrap_or("").trim();

            let date = parse_date(field(date_col)).ok_or_else(|| IngestError::InvalidDate {
                value: field(date_col).to_string(),
                row,
            })?;

            let opt_field = |i: Option<usize>| i.map(|i| field(i));

            records.push(RawSetRecord {
                date,
                workout_name: field(workout_col).to_string(),
                exercise_name: field(exercise_col).to_string(),
                set_order: coerce_numeric(field(set_order_col), "Set Order", row)
                    .trunc()
                    .to_u32()
                    .unwrap_or(0),
                weight: coerce_numeric(field(weight_col), "Weight (kg)", row),
                reps: coerce_numeric(field(reps_col), "Reps", row)
                    .trunc()
                    .to_u32()
                    .unwrap_or(0),
                rpe: coerce_optional(opt_field(rpe_col), "RPE", row),
                distance: coerce_optional(opt_field(distance_col), "Distance (meters)", row),
                duration_seconds: coerce_optional(opt_field(duration_col), "Duration (sec)", row),
                notes: opt_field(notes_col)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string()),
            });
        }

        if records.is_empty() {
            return Err(IngestError::Empty.into());
        }

        tracing::info!(rows = records.len(), "parsed workout export");
        Ok(records)
    }
}

impl Default for StrongCsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a date cell. Time-of-day, when present, is discarded.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
    ];
    for format in formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return Some(d);
        }
    }
    None
}

/// Lenient numeric coercion: non-numeric or empty cells become 0.
fn coerce_numeric(value: &str, column: &str, row: usize) -> Decimal {
    if value.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(value) {
        Ok(d) if d >= Decimal::ZERO => d,
        Ok(d) => {
            tracing::debug!(column, row, value = %d, "negative value coerced to 0");
            Decimal::ZERO
        }
        Err(_) => {
            tracing::debug!(column, row, value, "non-numeric cell coerced to 0");
            Decimal::ZERO
        }
    }
}

fn coerce_optional(value: Option<&str>, column: &str, row: usize) -> Option<Decimal> {
    match value {
        None => None,
        Some("") => None,
        Some(v) => Some(coerce_numeric(v, column, row)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "Date;Workout Name;Exercise Name;Set Order;Weight (kg);Reps;RPE;Notes";

    fn import(body: &str) -> Result<Vec<RawSetRecord>> {
        let data = format!("{}\n{}", HEADER, body);
        StrongCsvImporter::new().import_reader(data.as_bytes())
    }

    #[test]
    fn test_basic_import() {
        let records = import(
            "2024-01-15 10:30:00;Push Day;Bench Press;1;80;5;8;felt strong\n\
             2024-01-15 10:30:00;Push Day;Bench Press;2;80;5;;",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].exercise_name, "Bench Press");
        assert_eq!(records[0].weight, dec!(80));
        assert_eq!(records[0].reps, 5);
        assert_eq!(records[0].rpe, Some(dec!(8)));
        assert_eq!(records[0].notes.as_deref(), Some("felt strong"));
        assert_eq!(records[1].rpe, None);
        assert_eq!(records[1].notes, None);
    }

    #[test]
    fn test_missing_columns_is_hard_error() {
        let data = "Date;Workout Name;Weight (kg)\n2024-01-15;Push Day;80";
        let err = StrongCsvImporter::new()
            .import_reader(data.as_bytes())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Exercise Name"));
        assert!(msg.contains("Reps"));
        assert!(msg.contains("Set Order"));
    }

    #[test]
    fn test_invalid_date_is_hard_error() {
        let err = import("not-a-date;Push Day;Bench Press;1;80;5;;").unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_non_numeric_cells_coerce_to_zero() {
        let records = import("2024-01-15;Push Day;Bench Press;1;heavy;banana;;").unwrap();
        assert_eq!(records[0].weight, Decimal::ZERO);
        assert_eq!(records[0].reps, 0);
    }

    #[test]
    fn test_date_only_format() {
        let records = import("2024-01-15;Push Day;Bench Press;1;80;5;;").unwrap();
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        let err = StrongCsvImporter::new()
            .import_reader(format!("{}\n", HEADER).as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::GymRsError::Ingest(IngestError::Empty)
        ));
    }

    #[test]
    fn test_comma_separator() {
        let data = "Date,Workout Name,Exercise Name,Set Order,Weight (kg),Reps\n\
                    2024-01-15,Pull Day,Deadlift,1,140,3";
        let records = StrongCsvImporter::with_separator(b',')
            .import_reader(data.as_bytes())
            .unwrap();
        assert_eq!(records[0].weight, dec!(140));
    }
}
