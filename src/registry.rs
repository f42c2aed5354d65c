//! Cumulative records registry
//!
//! A small JSON side-file tracking best-ever records per exercise, per
//! muscle group, and overall, fed dataset-by-dataset. It is a cache, not a
//! system of record: a corrupt or missing file starts empty and the
//! registry is fully rebuilt by replaying exports. Single-process use only.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::models::{MuscleGroup, WorkoutSet};

/// Record dimensions tracked per scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDimension {
    Weight,
    Reps,
    SetVolume,
    WorkoutVolume,
    OneRepMax,
}

impl RecordDimension {
    pub fn label(&self) -> &'static str {
        match self {
            RecordDimension::Weight => "max weight",
            RecordDimension::Reps => "max reps",
            RecordDimension::SetVolume => "max set volume",
            RecordDimension::WorkoutVolume => "max workout volume",
            RecordDimension::OneRepMax => "max estimated 1RM",
        }
    }
}

impl std::str::FromStr for RecordDimension {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weight" => Ok(RecordDimension::Weight),
            "reps" => Ok(RecordDimension::Reps),
            "set-volume" | "set_volume" | "volume" => Ok(RecordDimension::SetVolume),
            "workout-volume" | "workout_volume" => Ok(RecordDimension::WorkoutVolume),
            "1rm" | "one-rep-max" | "one_rep_max" => Ok(RecordDimension::OneRepMax),
            _ => Err(format!("Unknown record dimension: {}", s)),
        }
    }
}

/// One stored best-ever value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub value: Decimal,
    pub date: NaiveDate,
    /// Which exercise achieved it; absent inside an exercise's own records
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exercise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weight: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reps: Option<u32>,
}

/// Records and achievement history for one scope (an exercise, a muscle
/// group, or the whole dataset)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeRecords {
    pub max_weight: Option<RecordEntry>,
    pub max_reps: Option<RecordEntry>,
    pub max_set_volume: Option<RecordEntry>,
    pub max_workout_volume: Option<RecordEntry>,
    pub max_one_rep_max: Option<RecordEntry>,
    /// Date string (YYYY-MM-DD) to achievement descriptions, deduplicated
    #[serde(default)]
    pub history: BTreeMap<String, Vec<String>>,
}

impl ScopeRecords {
    pub fn get(&self, dimension: RecordDimension) -> Option<&RecordEntry> {
        match dimension {
            RecordDimension::Weight => self.max_weight.as_ref(),
            RecordDimension::Reps => self.max_reps.as_ref(),
            RecordDimension::SetVolume => self.max_set_volume.as_ref(),
            RecordDimension::WorkoutVolume => self.max_workout_volume.as_ref(),
            RecordDimension::OneRepMax => self.max_one_rep_max.as_ref(),
        }
    }

    fn slot(&mut self, dimension: RecordDimension) -> &mut Option<RecordEntry> {
        match dimension {
            RecordDimension::Weight => &mut self.max_weight,
            RecordDimension::Reps => &mut self.max_reps,
            RecordDimension::SetVolume => &mut self.max_set_volume,
            RecordDimension::WorkoutVolume => &mut self.max_workout_volume,
            RecordDimension::OneRepMax => &mut self.max_one_rep_max,
        }
    }

    /// Install a candidate if strictly greater than the stored value.
    /// Returns true when a new record was set.
    fn offer(&mut self, dimension: RecordDimension, candidate: RecordEntry) -> bool {
        if candidate.value <= Decimal::ZERO {
            return false;
        }
        let improves = match self.slot(dimension) {
            Some(current) => candidate.value > current.value,
            None => true,
        };
        if !improves {
            return false;
        }

        let description = describe(dimension, &candidate);
        let day = self
            .history
            .entry(candidate.date.format("%Y-%m-%d").to_string())
            .or_default();
        if !day.contains(&description) {
            day.push(description);
        }

        *self.slot(dimension) = Some(candidate);
        true
    }
}

fn describe(dimension: RecordDimension, entry: &RecordEntry) -> String {
    let mut description = format!("New {}: {}", dimension.label(), entry.value);
    match dimension {
        RecordDimension::Weight | RecordDimension::OneRepMax => {
            description.push_str(" kg");
        }
        RecordDimension::SetVolume | RecordDimension::WorkoutVolume => {
            description.push_str(" kg total");
        }
        RecordDimension::Reps => {}
    }
    if let (Some(weight), Some(reps)) = (entry.weight, entry.reps) {
        description.push_str(&format!(" ({} kg x {})", weight, reps));
    }
    if let Some(exercise) = &entry.exercise {
        description.push_str(&format!(" [{}]", exercise));
    }
    description
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct RegistryData {
    exercises: BTreeMap<String, ScopeRecords>,
    muscle_groups: BTreeMap<String, ScopeRecords>,
    overall: ScopeRecords,
    last_updated: Option<DateTime<Utc>>,
}

/// Scope a timeline event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    Exercise,
    MuscleGroup,
    Overall,
}

impl std::fmt::Display for RecordScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordScope::Exercise => f.write_str("exercise"),
            RecordScope::MuscleGroup => f.write_str("muscle group"),
            RecordScope::Overall => f.write_str("overall"),
        }
    }
}

/// One record-setting event, for timeline queries
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub scope: RecordScope,
    /// Exercise or muscle-group name; empty for the overall scope
    pub name: String,
    pub description: String,
}

/// Filters for [`RecordsRegistry::timeline`]
#[derive(Debug, Clone, Default)]
pub struct TimelineFilter {
    pub exercise: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    /// Case-insensitive substring over event descriptions
    pub contains: Option<String>,
}

/// Outcome of one registry update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub new_records: usize,
}

/// The cumulative registry. Owns its file exclusively: loaded once,
/// rewritten after every update.
#[derive(Debug)]
pub struct RecordsRegistry {
    path: Option<PathBuf>,
    data: RegistryData,
}

impl RecordsRegistry {
    /// Load the registry from `path`. A missing or unreadable file starts
    /// an empty registry; this is the normal first-run path.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "registry file corrupt, starting empty");
                    RegistryData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RegistryData::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "registry file unreadable, starting empty");
                RegistryData::default()
            }
        };
        RecordsRegistry {
            path: Some(path.to_path_buf()),
            data,
        }
    }

    /// An unbacked registry; nothing is persisted
    pub fn in_memory() -> Self {
        RecordsRegistry {
            path: None,
            data: RegistryData::default(),
        }
    }

    /// Fold a dataset into the registry and persist the result.
    ///
    /// Only strictly-greater values displace stored records, so replaying
    /// the same dataset is a no-op.
    pub fn update(&mut self, sets: &[WorkoutSet]) -> Result<UpdateOutcome> {
        let mut new_records = 0usize;

        // Exercise scope
        let mut exercise_names: Vec<&str> = sets.iter().map(|s| s.exercise_name.as_str()).collect();
        exercise_names.sort_unstable();
        exercise_names.dedup();
        for name in exercise_names {
            let subset: Vec<&WorkoutSet> =
                sets.iter().filter(|s| s.exercise_name == name).collect();
            let scope = self.data.exercises.entry(name.to_string()).or_default();
            new_records += offer_all(scope, &subset, false);
        }

        // Muscle-group scope
        let mut groups: Vec<MuscleGroup> = sets.iter().map(|s| s.muscle_group).collect();
        groups.sort_unstable();
        groups.dedup();
        for group in groups {
            let subset: Vec<&WorkoutSet> =
                sets.iter().filter(|s| s.muscle_group == group).collect();
            let scope = self
                .data
                .muscle_groups
                .entry(group.name().to_string())
                .or_default();
            new_records += offer_all(scope, &subset, true);
        }

        // Overall scope
        let all: Vec<&WorkoutSet> = sets.iter().collect();
        new_records += offer_all(&mut self.data.overall, &all, true);

        if new_records > 0 {
            self.data.last_updated = Some(Utc::now());
        }
        tracing::info!(new_records, "registry updated");
        self.save()?;
        Ok(UpdateOutcome { new_records })
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| RegistryError::Serialize {
                reason: e.to_string(),
            })?;
        std::fs::write(path, json).map_err(|e| RegistryError::SaveFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn get_exercise_records(&self, name: &str) -> Option<&ScopeRecords> {
        self.data.exercises.get(name)
    }

    pub fn get_muscle_group_records(&self, group: MuscleGroup) -> Option<&ScopeRecords> {
        self.data.muscle_groups.get(group.name())
    }

    pub fn overall_records(&self) -> &ScopeRecords {
        &self.data.overall
    }

    pub fn exercise_names(&self) -> impl Iterator<Item = &str> {
        self.data.exercises.keys().map(String::as_str)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.data.last_updated
    }

    /// Exercises ranked descending by their stored record on `dimension`
    pub fn leaderboard(
        &self,
        dimension: RecordDimension,
        top_n: usize,
    ) -> Vec<(String, RecordEntry)> {
        let mut ranked: Vec<(String, RecordEntry)> = self
            .data
            .exercises
            .iter()
            .filter_map(|(name, scope)| {
                scope.get(dimension).map(|entry| (name.clone(), entry.clone()))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.value.cmp(&a.1.value).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top_n);
        ranked
    }

    /// Recent record-setting events, newest first
    pub fn timeline(&self, filter: &TimelineFilter, limit: usize) -> Vec<TimelineEvent> {
        let mut events: Vec<TimelineEvent> = Vec::new();

        let collect = |events: &mut Vec<TimelineEvent>,
                       scope: RecordScope,
                       name: &str,
                       records: &ScopeRecords| {
            for (date_str, descriptions) in &records.history {
                let Ok(date) = date_str.parse::<NaiveDate>() else {
                    continue;
                };
                for description in descriptions {
                    events.push(TimelineEvent {
                        date,
                        scope,
                        name: name.to_string(),
                        description: description.clone(),
                    });
                }
            }
        };

        match (&filter.exercise, filter.muscle_group) {
            (Some(exercise), _) => {
                if let Some(records) = self.data.exercises.get(exercise) {
                    collect(&mut events, RecordScope::Exercise, exercise, records);
                }
            }
            (None, Some(group)) => {
                if let Some(records) = self.data.muscle_groups.get(group.name()) {
                    collect(&mut events, RecordScope::MuscleGroup, group.name(), records);
                }
            }
            (None, None) => {
                for (name, records) in &self.data.exercises {
                    collect(&mut events, RecordScope::Exercise, name, records);
                }
                for (name, records) in &self.data.muscle_groups {
                    collect(&mut events, RecordScope::MuscleGroup, name, records);
                }
                collect(&mut events, RecordScope::Overall, "", &self.data.overall);
            }
        }

        if let Some(needle) = &filter.contains {
            let needle = needle.to_lowercase();
            events.retain(|e| e.description.to_lowercase().contains(&needle));
        }

        events.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.description.cmp(&b.description))
        });
        events.truncate(limit);
        events
    }

    /// Record events on or after `since`, newest first
    pub fn recent(&self, since: NaiveDate, limit: usize) -> Vec<TimelineEvent> {
        let mut events = self.timeline(&TimelineFilter::default(), usize::MAX);
        events.retain(|e| e.date >= since);
        events.truncate(limit);
        events
    }
}

/// The maximal set under `key`; ties go to the earliest date, so a record
/// equalled later in the same batch keeps its original date
fn earliest_max<'a, K, F>(subset: &[&'a WorkoutSet], key: F) -> Option<&'a WorkoutSet>
where
    K: PartialOrd,
    F: Fn(&WorkoutSet) -> K,
{
    subset.iter().copied().fold(None, |best, set| match best {
        None => Some(set),
        Some(current) => {
            let candidate = key(set);
            let incumbent = key(current);
            if candidate > incumbent || (candidate == incumbent && set.date < current.date) {
                Some(set)
            } else {
                Some(current)
            }
        }
    })
}

/// Offer every record dimension of a subset to one scope. Returns the
/// number of new records installed.
fn offer_all(scope: &mut ScopeRecords, subset: &[&WorkoutSet], with_exercise: bool) -> usize {
    let mut new_records = 0usize;

    let exercise_of = |set: &WorkoutSet| {
        if with_exercise {
            Some(set.exercise_name.clone())
        } else {
            None
        }
    };

    if let Some(set) = earliest_max(subset, |s| s.weight) {
        if scope.offer(
            RecordDimension::Weight,
            RecordEntry {
                value: set.weight,
                date: set.date,
                exercise: exercise_of(set),
                weight: None,
                reps: Some(set.reps),
            },
        ) {
            new_records += 1;
        }
    }

    if let Some(set) = earliest_max(subset, |s| s.reps) {
        if scope.offer(
            RecordDimension::Reps,
            RecordEntry {
                value: Decimal::from(set.reps),
                date: set.date,
                exercise: exercise_of(set),
                weight: Some(set.weight),
                reps: None,
            },
        ) {
            new_records += 1;
        }
    }

    if let Some(set) = earliest_max(subset, |s| s.volume) {
        if scope.offer(
            RecordDimension::SetVolume,
            RecordEntry {
                value: set.volume,
                date: set.date,
                exercise: exercise_of(set),
                weight: Some(set.weight),
                reps: Some(set.reps),
            },
        ) {
            new_records += 1;
        }
    }

    // Workout volume: sum per session, then take the best session
    let mut per_workout: BTreeMap<&str, (Decimal, NaiveDate)> = BTreeMap::new();
    for set in subset {
        let entry = per_workout
            .entry(set.workout_id.as_str())
            .or_insert((Decimal::ZERO, set.date));
        entry.0 += set.volume;
    }
    let best_session = per_workout
        .values()
        .fold(None, |best: Option<&(Decimal, NaiveDate)>, entry| {
            match best {
                None => Some(entry),
                Some(current) if entry.0 > current.0 || (entry.0 == current.0 && entry.1 < current.1) => {
                    Some(entry)
                }
                other => other,
            }
        });
    if let Some((volume, date)) = best_session {
        if scope.offer(
            RecordDimension::WorkoutVolume,
            RecordEntry {
                value: *volume,
                date: *date,
                exercise: None,
                weight: None,
                reps: None,
            },
        ) {
            new_records += 1;
        }
    }

    if let Some(set) = earliest_max(subset, |s| s.one_rep_max) {
        if scope.offer(
            RecordDimension::OneRepMax,
            RecordEntry {
                value: set.one_rep_max,
                date: set.date,
                exercise: exercise_of(set),
                weight: Some(set.weight),
                reps: Some(set.reps),
            },
        ) {
            new_records += 1;
        }
    }

    new_records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::import::RawSetRecord;
    use crate::prs::flag_personal_records;
    use rust_decimal_macros::dec;

    fn raw(date: &str, exercise: &str, weight: Decimal, reps: u32) -> RawSetRecord {
        RawSetRecord {
            date: date.parse().unwrap(),
            workout_name: "Workout".to_string(),
            exercise_name: exercise.to_string(),
            set_order: 1,
            weight,
            reps,
            rpe: None,
            distance: None,
            duration_seconds: None,
            notes: None,
        }
    }

    fn dataset(records: Vec<RawSetRecord>) -> Vec<WorkoutSet> {
        flag_personal_records(enrich(records))
    }

    #[test]
    fn test_update_records_all_dimensions() {
        let mut registry = RecordsRegistry::in_memory();
        let sets = dataset(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            raw("2024-01-17", "Bench Press", dec!(60), 12),
        ]);
        let outcome = registry.update(&sets).unwrap();
        assert!(outcome.new_records > 0);

        let records = registry.get_exercise_records("Bench Press").unwrap();
        assert_eq!(records.max_weight.as_ref().unwrap().value, dec!(80));
        assert_eq!(records.max_reps.as_ref().unwrap().value, dec!(12));
        // 720 from the 60x12 set beats 400 from 80x5
        assert_eq!(records.max_set_volume.as_ref().unwrap().value, dec!(720));
        assert!(records.max_one_rep_max.is_some());
        assert!(!records.history.is_empty());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut registry = RecordsRegistry::in_memory();
        let sets = dataset(vec![
            raw("2024-01-15", "Bench Press", dec!(80), 5),
            raw("2024-01-17", "Squat", dec!(120), 5),
        ]);
        registry.update(&sets).unwrap();
        let before = registry.get_exercise_records("Bench Press").unwrap().clone();

        let outcome = registry.update(&sets).unwrap();
        assert_eq!(outcome.new_records, 0);
        assert_eq!(
            registry.get_exercise_records("Bench Press").unwrap(),
            &before
        );
    }

    #[test]
    fn test_only_strictly_greater_displaces() {
        let mut registry = RecordsRegistry::in_memory();
        registry
            .update(&dataset(vec![raw("2024-01-15", "Bench Press", dec!(80), 5)]))
            .unwrap();
        // Same weight later: record keeps the original date
        registry
            .update(&dataset(vec![raw("2024-02-15", "Bench Press", dec!(80), 5)]))
            .unwrap();
        let record = registry
            .get_exercise_records("Bench Press")
            .unwrap()
            .max_weight
            .clone()
            .unwrap();
        assert_eq!(record.date, "2024-01-15".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_tie_within_one_batch_keeps_earliest_date() {
        let mut registry = RecordsRegistry::in_memory();
        // Later date first in input order; every dimension ties across the
        // two sessions, and each record must carry the earlier date
        let sets = dataset(vec![
            raw("2024-02-15", "Bench Press", dec!(80), 5),
            raw("2024-01-15", "Bench Press", dec!(80), 5),
        ]);
        registry.update(&sets).unwrap();

        let records = registry.get_exercise_records("Bench Press").unwrap();
        let earlier = "2024-01-15".parse::<NaiveDate>().unwrap();
        assert_eq!(records.max_weight.as_ref().unwrap().date, earlier);
        assert_eq!(records.max_reps.as_ref().unwrap().date, earlier);
        assert_eq!(records.max_set_volume.as_ref().unwrap().date, earlier);
        assert_eq!(records.max_workout_volume.as_ref().unwrap().date, earlier);
        assert_eq!(records.max_one_rep_max.as_ref().unwrap().date, earlier);
    }

    #[test]
    fn test_muscle_group_and_overall_scopes() {
        let mut registry = RecordsRegistry::in_memory();
        registry
            .update(&dataset(vec![
                raw("2024-01-15", "Bench Press", dec!(80), 5),
                raw("2024-01-15", "Squat", dec!(120), 5),
            ]))
            .unwrap();

        let chest = registry.get_muscle_group_records(MuscleGroup::Chest).unwrap();
        assert_eq!(chest.max_weight.as_ref().unwrap().value, dec!(80));
        assert_eq!(
            chest.max_weight.as_ref().unwrap().exercise.as_deref(),
            Some("Bench Press")
        );

        let overall = registry.overall_records();
        assert_eq!(overall.max_weight.as_ref().unwrap().value, dec!(120));
        assert_eq!(
            overall.max_weight.as_ref().unwrap().exercise.as_deref(),
            Some("Squat")
        );
    }

    #[test]
    fn test_zero_values_never_recorded() {
        let mut registry = RecordsRegistry::in_memory();
        registry
            .update(&dataset(vec![raw("2024-01-15", "Plank", dec!(0), 0)]))
            .unwrap();
        let records = registry.get_exercise_records("Plank").unwrap();
        assert!(records.max_weight.is_none());
        assert!(records.max_reps.is_none());
        assert!(records.max_set_volume.is_none());
    }

    #[test]
    fn test_leaderboard() {
        let mut registry = RecordsRegistry::in_memory();
        registry
            .update(&dataset(vec![
                raw("2024-01-15", "Bench Press", dec!(80), 5),
                raw("2024-01-15", "Squat", dec!(120), 5),
                raw("2024-01-15", "Deadlift", dec!(140), 5),
            ]))
            .unwrap();

        let board = registry.leaderboard(RecordDimension::Weight, 2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].0, "Deadlift");
        assert_eq!(board[0].1.value, dec!(140));
        assert_eq!(board[1].0, "Squat");
    }

    #[test]
    fn test_timeline_filters_and_order() {
        let mut registry = RecordsRegistry::in_memory();
        registry
            .update(&dataset(vec![raw("2024-01-15", "Bench Press", dec!(80), 5)]))
            .unwrap();
        registry
            .update(&dataset(vec![raw("2024-02-15", "Squat", dec!(120), 5)]))
            .unwrap();

        let all = registry.timeline(&TimelineFilter::default(), 100);
        assert!(!all.is_empty());
        // Newest first
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));

        let bench_only = registry.timeline(
            &TimelineFilter {
                exercise: Some("Bench Press".to_string()),
                ..Default::default()
            },
            100,
        );
        assert!(bench_only.iter().all(|e| e.name == "Bench Press"));

        let weight_only = registry.timeline(
            &TimelineFilter {
                contains: Some("max weight".to_string()),
                ..Default::default()
            },
            100,
        );
        assert!(weight_only
            .iter()
            .all(|e| e.description.contains("max weight")));

        let recent = registry.recent("2024-02-01".parse().unwrap(), 100);
        assert!(!recent.is_empty());
        assert!(recent.iter().all(|e| e.name != "Bench Press"));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let mut registry = RecordsRegistry::load(&path);
        registry
            .update(&dataset(vec![raw("2024-01-15", "Bench Press", dec!(80), 5)]))
            .unwrap();

        let reloaded = RecordsRegistry::load(&path);
        assert_eq!(
            reloaded
                .get_exercise_records("Bench Press")
                .unwrap()
                .max_weight
                .as_ref()
                .unwrap()
                .value,
            dec!(80)
        );
        assert!(reloaded.last_updated().is_some());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "{ not json").unwrap();

        let registry = RecordsRegistry::load(&path);
        assert!(registry.get_exercise_records("Bench Press").is_none());
        assert!(registry.overall_records().max_weight.is_none());
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RecordsRegistry::load(&dir.path().join("nope.json"));
        assert!(registry.exercise_names().next().is_none());
    }
}
