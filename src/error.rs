//! Unified error hierarchy for GymRS
//!
//! Provides a structured error type system with context preservation
//! and integration with the tracing system.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all GymRS operations
#[derive(Debug, Error)]
pub enum GymRsError {
    /// CSV ingestion errors (structural, fatal for the whole import)
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// Analysis/calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Records registry persistence errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Structural ingestion errors
///
/// Cell-level data problems (non-numeric weight, reps, RPE) are not errors;
/// they are coerced to 0 and logged. These variants cover failures where no
/// partial dataset can be returned.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// One or more required columns are absent from the header
    #[error("CSV is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A date cell could not be parsed
    #[error("Unparseable date '{value}' in row {row}")]
    InvalidDate { value: String, row: usize },

    /// The file could not be read as CSV at all
    #[error("Malformed CSV: {reason}")]
    Malformed { reason: String },

    /// The file parsed but contained no data rows
    #[error("No data rows found in input")]
    Empty,
}

/// Calculation errors
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Insufficient data for calculation
    #[error("Insufficient data for {calculation}: {reason}")]
    InsufficientData { calculation: String, reason: String },

    /// Invalid parameter
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },
}

/// Records registry errors
///
/// Load failures are never surfaced through this type; a corrupt or missing
/// registry file reinitializes to empty. Only save/serialize failures are
/// reported.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry could not be written to disk
    #[error("Failed to save registry to {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },

    /// Registry state could not be serialized
    #[error("Failed to serialize registry: {reason}")]
    Serialize { reason: String },
}

/// Result type alias for GymRS operations
pub type Result<T> = std::result::Result<T, GymRsError>;

impl GymRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GymRsError::Ingest(IngestError::FileNotFound { .. }) => ErrorSeverity::Warning,
            GymRsError::Ingest(_) => ErrorSeverity::Error,
            GymRsError::Calculation(_) => ErrorSeverity::Warning,
            GymRsError::Registry(_) => ErrorSeverity::Error,
            GymRsError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GymRsError::Ingest(IngestError::FileNotFound { path }) => {
                format!("Could not find workout export: {}", path.display())
            }
            GymRsError::Ingest(IngestError::MissingColumns { columns }) => {
                format!(
                    "This file does not look like a workout export. Missing columns: {}",
                    columns.join(", ")
                )
            }
            GymRsError::Calculation(CalculationError::InsufficientData {
                calculation, ..
            }) => {
                format!("Not enough data to calculate {}.", calculation)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
