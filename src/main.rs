use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use gymrs::balance::compute_balance;
use gymrs::config::AppConfig;
use gymrs::enrich::{intensity_summary, summarize, volume_by_rep_range};
use gymrs::error::Result;
use gymrs::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use gymrs::models::{MuscleGroup, WorkoutSet};
use gymrs::progression::{
    detect_plateaus, exercise_progression, most_improved, pr_frequency_trend, strength_trend,
    volume_trend, Period, StrengthMetric, TrendPoint,
};
use gymrs::patterns::{split_half_comparison, workout_patterns};
use gymrs::registry::{RecordDimension, RecordsRegistry, ScopeRecords, TimelineFilter};

/// GymRS - Workout Log Analytics CLI
///
/// Analyzes workout-log exports: derived metrics (volume, estimated 1RM),
/// personal records, progression trends, plateaus, training balance, and a
/// cumulative records registry.
#[derive(Parser)]
#[command(name = "gymrs")]
#[command(version = "0.1.0")]
#[command(about = "Workout Log Analytics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, default_value = "compact", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a workout export and show a dataset summary
    Import {
        /// Workout export CSV
        file: PathBuf,

        /// Write the enriched, PR-flagged dataset as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show progression for one exercise
    Progression {
        /// Workout export CSV
        file: PathBuf,

        /// Exercise name, as it appears in the log
        #[arg(short, long)]
        exercise: String,
    },

    /// Rank the most improved exercises
    Improved {
        /// Workout export CSV
        file: PathBuf,

        /// Minimum distinct workout dates to qualify
        #[arg(long)]
        min_occurrences: Option<usize>,

        /// How many exercises to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Detect plateaus for one exercise
    Plateaus {
        /// Workout export CSV
        file: PathBuf,

        /// Exercise name
        #[arg(short, long)]
        exercise: String,

        /// Minimum consecutive workouts for a plateau
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Show a period trend (volume, PR frequency, or strength)
    Trends {
        /// Workout export CSV
        file: PathBuf,

        /// Bucketing: week, month, or year
        #[arg(short, long)]
        period: Option<String>,

        /// Metric: volume, prs, weight, or 1rm
        #[arg(short, long, default_value = "volume")]
        metric: String,
    },

    /// Show workout frequency and consistency statistics
    Patterns {
        /// Workout export CSV
        file: PathBuf,
    },

    /// Analyze push/pull and upper/lower training balance
    Balance {
        /// Workout export CSV
        file: PathBuf,
    },

    /// Query or update the cumulative records registry
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },
}

#[derive(Subcommand)]
enum RecordsAction {
    /// Fold a workout export into the registry
    Update {
        /// Workout export CSV
        file: PathBuf,
    },

    /// Show stored records for an exercise, a muscle group, or overall
    Show {
        /// Exercise name
        #[arg(short, long)]
        exercise: Option<String>,

        /// Muscle group name
        #[arg(short, long)]
        muscle_group: Option<MuscleGroup>,
    },

    /// Rank exercises by a record dimension
    Leaderboard {
        /// Dimension: weight, reps, volume, workout-volume, or 1rm
        #[arg(short, long, default_value = "weight")]
        dimension: RecordDimension,

        /// How many exercises to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show recent record-setting events
    Timeline {
        /// Only events for this exercise
        #[arg(short, long)]
        exercise: Option<String>,

        /// Only events for this muscle group
        #[arg(short, long)]
        muscle_group: Option<MuscleGroup>,

        /// Only events whose description contains this text
        #[arg(long)]
        contains: Option<String>,

        /// Only events from the last N days
        #[arg(short, long)]
        days: Option<i64>,

        /// Maximum events to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        format: cli.log_format,
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", "error:".red().bold(), e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_default()?,
    };
    let separator = config.import.separator_byte();

    match cli.command {
        Commands::Import { file, output } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            print_summary(&sets);
            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&sets)
                    .map_err(|e| gymrs::GymRsError::Internal(e.to_string()))?;
                std::fs::write(&output, json)?;
                println!(
                    "\n{} {}",
                    "✓ Enriched dataset written to".green(),
                    output.display()
                );
            }
        }

        Commands::Progression { file, exercise } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            print_progression(&sets, &exercise);
        }

        Commands::Improved {
            file,
            min_occurrences,
            top,
        } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            let min_occurrences = min_occurrences.unwrap_or(config.analysis.min_occurrences);
            let top = top.unwrap_or(config.analysis.top_n);
            print_improved(&sets, min_occurrences, top);
        }

        Commands::Plateaus {
            file,
            exercise,
            window,
        } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            let window = window.unwrap_or(config.analysis.plateau_window);
            print_plateaus(&sets, &exercise, window);
        }

        Commands::Trends {
            file,
            period,
            metric,
        } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            let period: Period = period
                .as_deref()
                .unwrap_or(&config.analysis.period)
                .parse()
                .map_err(gymrs::GymRsError::Configuration)?;
            print_trends(&sets, period, &metric)?;
        }

        Commands::Patterns { file } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            print_patterns(&sets);
        }

        Commands::Balance { file } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            print_balance(&sets, &config);
        }

        Commands::Records { action } => {
            let registry_path = config.registry.resolved_path();
            run_records(action, &registry_path, separator)?;
        }
    }

    Ok(())
}

fn run_records(action: RecordsAction, registry_path: &Path, separator: u8) -> Result<()> {
    let mut registry = RecordsRegistry::load(registry_path);

    match action {
        RecordsAction::Update { file } => {
            let sets = gymrs::load_dataset(&file, separator)?;
            let outcome = registry.update(&sets)?;
            println!(
                "{} {} new record(s); registry at {}",
                "✓".green(),
                outcome.new_records,
                registry_path.display()
            );
        }

        RecordsAction::Show {
            exercise,
            muscle_group,
        } => match (exercise, muscle_group) {
            (Some(name), _) => match registry.get_exercise_records(&name) {
                Some(records) => print_scope_records(&name, records),
                None => println!("No records stored for {}", name.bold()),
            },
            (None, Some(group)) => match registry.get_muscle_group_records(group) {
                Some(records) => print_scope_records(group.name(), records),
                None => println!("No records stored for {}", group.name().bold()),
            },
            (None, None) => print_scope_records("Overall", registry.overall_records()),
        },

        RecordsAction::Leaderboard { dimension, top } => {
            let board = registry.leaderboard(dimension, top.unwrap_or(10));
            if board.is_empty() {
                println!("Registry is empty; run `gymrs records update` first.");
                return Ok(());
            }
            #[derive(Tabled)]
            struct Row {
                #[tabled(rename = "#")]
                rank: usize,
                #[tabled(rename = "Exercise")]
                exercise: String,
                #[tabled(rename = "Value")]
                value: String,
                #[tabled(rename = "Date")]
                date: String,
            }
            let rows: Vec<Row> = board
                .into_iter()
                .enumerate()
                .map(|(i, (exercise, entry))| Row {
                    rank: i + 1,
                    exercise,
                    value: entry.value.round_dp(1).to_string(),
                    date: entry.date.to_string(),
                })
                .collect();
            println!("{}", format!("Leaderboard: {}", dimension.label()).bold());
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        RecordsAction::Timeline {
            exercise,
            muscle_group,
            contains,
            days,
            limit,
        } => {
            let events = match days {
                Some(days) => {
                    let since = chrono::Utc::now().date_naive() - chrono::Duration::days(days);
                    registry.recent(since, limit)
                }
                None => {
                    let filter = TimelineFilter {
                        exercise,
                        muscle_group,
                        contains,
                    };
                    registry.timeline(&filter, limit)
                }
            };
            if events.is_empty() {
                println!("No record events match.");
                return Ok(());
            }
            for event in events {
                let name = if event.name.is_empty() {
                    event.scope.to_string()
                } else {
                    event.name.clone()
                };
                println!(
                    "{}  {}  {}",
                    event.date.to_string().dimmed(),
                    name.bold(),
                    event.description
                );
            }
        }
    }

    Ok(())
}

fn print_scope_records(name: &str, records: &ScopeRecords) {
    println!("{}", format!("Records: {}", name).bold());

    let describe = |label: &str, entry: &Option<gymrs::registry::RecordEntry>| {
        let Some(entry) = entry else {
            println!("  {:<20} -", label);
            return;
        };
        let mut line = format!("  {:<20} {} on {}", label, entry.value.round_dp(1), entry.date);
        if let (Some(weight), Some(reps)) = (entry.weight, entry.reps) {
            line.push_str(&format!(" ({} kg x {})", weight, reps));
        }
        if let Some(exercise) = &entry.exercise {
            line.push_str(&format!(" [{}]", exercise));
        }
        println!("{}", line);
    };

    describe("Max weight (kg)", &records.max_weight);
    describe("Max reps", &records.max_reps);
    describe("Max set volume", &records.max_set_volume);
    describe("Max workout volume", &records.max_workout_volume);
    describe("Max est. 1RM (kg)", &records.max_one_rep_max);

    if records.history.is_empty() {
        return;
    }
    println!("\n{}", "Recent achievements".bold());
    for (date, descriptions) in records.history.iter().rev().take(5) {
        for description in descriptions {
            println!("  {}  {}", date.as_str().dimmed(), description);
        }
    }
}

fn pct(value: Decimal) -> String {
    let rounded = value.round_dp(1);
    if rounded > Decimal::ZERO {
        format!("+{}%", rounded).green().to_string()
    } else if rounded < Decimal::ZERO {
        format!("{}%", rounded).red().to_string()
    } else {
        format!("{}%", rounded)
    }
}

fn print_summary(sets: &[WorkoutSet]) {
    let Some(summary) = summarize(sets) else {
        println!("Dataset is empty.");
        return;
    };

    println!("{}", "Dataset summary".bold());
    println!(
        "  {} to {} ({} days)",
        summary.start_date, summary.end_date, summary.date_range_days
    );
    println!(
        "  {} sets across {} workouts, {} exercises, {} muscle groups",
        summary.total_sets,
        summary.total_workouts,
        summary.total_exercises,
        summary.total_muscle_groups
    );
    println!(
        "  Total volume: {} kg, avg {} kg per workout",
        summary.total_volume.round_dp(0),
        summary.avg_volume_per_workout.round_dp(0)
    );
    println!(
        "  Max weight: {} kg (avg {} kg), max reps: {} (avg {})",
        summary.max_weight,
        summary.avg_weight.round_dp(1),
        summary.max_reps,
        summary.avg_reps.round_dp(1)
    );
    if let Some(rpe) = summary.avg_rpe {
        println!("  Avg RPE: {}", rpe.round_dp(1));
    }
    if let Some(duration) = summary.avg_workout_duration_seconds {
        println!(
            "  Avg workout duration: {} min",
            (duration / Decimal::from(60)).round_dp(0)
        );
    }

    let pr_count = sets.iter().filter(|s| s.pr.any).count();
    println!("  Personal-record sets: {}", pr_count);

    let shares = volume_by_rep_range(sets);
    if !shares.is_empty() {
        println!("\n{}", "Volume by rep range".bold());
        for (range, share) in shares {
            println!("  {:<30} {}%", range.label(), share.round_dp(1));
        }
    }

    if let Some(intensity) = intensity_summary(sets) {
        println!("\n{}", "Training intensity (% of est. 1RM)".bold());
        println!("  {:<30} {}%", "Overall", intensity.avg_intensity_pct.round_dp(1));
        for (group, avg) in &intensity.by_muscle_group {
            println!("  {:<30} {}%", group.name(), avg.round_dp(1));
        }
    }
}

fn print_progression(sets: &[WorkoutSet], exercise: &str) {
    let Some(progression) = exercise_progression(sets, exercise) else {
        println!("No data for {}.", exercise.bold());
        return;
    };

    println!("{}", format!("Progression: {}", exercise).bold());
    println!(
        "  Weight: {}  Volume: {}  Est. 1RM: {}",
        pct(progression.weight_change_pct),
        pct(progression.volume_change_pct),
        pct(progression.one_rep_max_change_pct)
    );
    println!(
        "  Avg weight change per workout: {} kg",
        progression.avg_weight_change_per_workout.round_dp(2)
    );
    println!(
        "  Best weight: {} kg on {}",
        progression.best_weight.value, progression.best_weight.date
    );
    println!(
        "  Best volume: {} kg on {}",
        progression.best_volume.value, progression.best_volume.date
    );
    println!(
        "  Best est. 1RM: {} kg on {}",
        progression.best_one_rep_max.value.round_dp(1),
        progression.best_one_rep_max.date
    );

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Max weight")]
        weight: String,
        #[tabled(rename = "Max reps")]
        reps: u32,
        #[tabled(rename = "Volume")]
        volume: String,
        #[tabled(rename = "Est. 1RM")]
        one_rep_max: String,
    }
    let rows: Vec<Row> = progression
        .points
        .iter()
        .map(|p| Row {
            date: p.date.to_string(),
            weight: p.max_weight.to_string(),
            reps: p.max_reps,
            volume: p.total_volume.round_dp(0).to_string(),
            one_rep_max: p.max_one_rep_max.round_dp(1).to_string(),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_improved(sets: &[WorkoutSet], min_occurrences: usize, top: usize) {
    let ranked = most_improved(sets, min_occurrences, top);
    if ranked.is_empty() {
        println!(
            "No exercise has at least {} workouts yet.",
            min_occurrences
        );
        return;
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Exercise")]
        exercise: String,
        #[tabled(rename = "Workouts")]
        workouts: usize,
        #[tabled(rename = "Weight")]
        weight: String,
        #[tabled(rename = "Volume")]
        volume: String,
        #[tabled(rename = "Est. 1RM")]
        one_rep_max: String,
        #[tabled(rename = "Overall")]
        overall: String,
    }
    let rows: Vec<Row> = ranked
        .into_iter()
        .map(|e| Row {
            exercise: e.exercise_name,
            workouts: e.workout_count,
            weight: pct(e.weight_change_pct),
            volume: pct(e.volume_change_pct),
            one_rep_max: pct(e.one_rep_max_change_pct),
            overall: pct(e.overall_improvement_pct),
        })
        .collect();
    println!("{}", "Most improved exercises".bold());
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_plateaus(sets: &[WorkoutSet], exercise: &str, window: usize) {
    let plateaus = detect_plateaus(sets, exercise, window);
    if plateaus.is_empty() {
        println!(
            "{} No plateau of {}+ workouts for {}.",
            "✓".green(),
            window,
            exercise.bold()
        );
        return;
    }

    println!("{}", format!("Plateaus: {}", exercise).bold());
    for plateau in plateaus {
        println!(
            "  {} to {}: stuck at {} kg for {} workouts",
            plateau.start_date,
            plateau.end_date,
            plateau.value,
            plateau.workout_count
        );
    }
}

fn print_trends(sets: &[WorkoutSet], period: Period, metric: &str) -> Result<()> {
    let (title, trend): (&str, Vec<TrendPoint>) = match metric.to_lowercase().as_str() {
        "volume" => ("Volume", volume_trend(sets, period)),
        "prs" | "pr" => ("PR frequency", pr_frequency_trend(sets, period)),
        "weight" => (
            "Mean weight",
            strength_trend(sets, period, StrengthMetric::Weight),
        ),
        "1rm" | "one-rep-max" => (
            "Mean est. 1RM",
            strength_trend(sets, period, StrengthMetric::OneRepMax),
        ),
        other => {
            return Err(gymrs::GymRsError::Configuration(format!(
                "unknown trend metric: {}",
                other
            )))
        }
    };

    if trend.is_empty() {
        println!("Dataset is empty.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Period")]
        period: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Rolling avg")]
        rolling: String,
        #[tabled(rename = "Change")]
        change: String,
    }
    let rows: Vec<Row> = trend
        .into_iter()
        .map(|p| Row {
            period: p.period,
            value: p.value.round_dp(1).to_string(),
            rolling: p.rolling_avg.round_dp(1).to_string(),
            change: pct(p.change_pct),
        })
        .collect();
    println!("{}", format!("{} per {}", title, period.label()).bold());
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

fn print_patterns(sets: &[WorkoutSet]) {
    let Some(patterns) = workout_patterns(sets) else {
        println!("Dataset is empty.");
        return;
    };

    println!("{}", "Workout patterns".bold());
    println!(
        "  {} workouts from {} to {} ({} days)",
        patterns.total_workouts, patterns.start_date, patterns.end_date, patterns.date_range_days
    );
    println!(
        "  Avg per week: {}  Consistency: {}",
        patterns.avg_workouts_per_week.round_dp(1),
        patterns.consistency.round_dp(2)
    );
    println!(
        "  Longest streak: {} day(s)  Most common day: {}",
        patterns.longest_streak, patterns.most_common_weekday
    );
    if let Some(rest) = patterns.avg_rest_days {
        println!("  Avg rest days between workouts: {}", rest.round_dp(1));
    }

    if let Some(comparison) = split_half_comparison(sets) {
        println!("\n{}", "Second half vs first half".bold());
        println!("  Volume: {}", pct(comparison.volume_change_pct));
        println!(
            "  PRs: {} ({} vs {})",
            pct(comparison.pr_count_change_pct),
            comparison.second.pr_count,
            comparison.first.pr_count
        );
        println!("  Mean weight: {}", pct(comparison.mean_weight_change_pct));
    }
}

fn print_balance(sets: &[WorkoutSet], config: &AppConfig) {
    let Some(report) = compute_balance(sets, &config.balance.thresholds()) else {
        println!("Dataset carries no volume.");
        return;
    };

    println!("{}", "Volume by muscle group".bold());
    for (group, volume) in &report.muscle_volume {
        let share = report
            .muscle_percentage
            .get(group)
            .copied()
            .unwrap_or_default();
        println!(
            "  {:<12} {:>10} kg  {:>5}%",
            group.name(),
            volume.round_dp(0),
            share.round_dp(1)
        );
    }

    println!("\n{}", "Ratios".bold());
    match report.push_pull_ratio {
        Some(ratio) => println!("  Push/pull: {}", ratio.round_dp(2)),
        None => println!("  Push/pull: undefined (no pull volume)"),
    }
    match report.upper_lower_ratio {
        Some(ratio) => println!("  Upper/lower: {}", ratio.round_dp(2)),
        None => println!("  Upper/lower: undefined (no leg volume)"),
    }
    println!("  Core share: {}%", report.core_share.round_dp(1));

    if report.is_balanced {
        println!("\n{} Training looks balanced.", "✓".green().bold());
    } else {
        println!("\n{}", "Recommendations".bold());
        for recommendation in &report.recommendations {
            let tag = match recommendation.severity {
                gymrs::balance::Severity::High => "high    ".red().bold(),
                gymrs::balance::Severity::Moderate => "moderate".yellow(),
            };
            println!("  [{}] {}", tag, recommendation.message);
        }
    }
}
