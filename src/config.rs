//! Application configuration
//!
//! TOML config with full defaults: every section and key is optional, and
//! a missing config file means "all defaults". The default location is the
//! platform config directory (e.g. `~/.config/gymrs/config.toml`).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::balance::BalanceThresholds;
use crate::error::{GymRsError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub import: ImportSettings,
    pub analysis: AnalysisSettings,
    pub balance: BalanceSettings,
    pub registry: RegistrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// CSV field separator; export versions vary between ';' and ','
    pub separator: char,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings { separator: ';' }
    }
}

impl ImportSettings {
    /// Separator as the single byte the CSV reader needs. A configured
    /// non-ASCII character cannot be a CSV delimiter; it is ignored in
    /// favor of the default.
    pub fn separator_byte(&self) -> u8 {
        if self.separator.is_ascii() {
            self.separator as u8
        } else {
            tracing::warn!(
                separator = %self.separator,
                "configured separator is not ASCII, using ';'"
            );
            b';'
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Minimum consecutive workouts for a plateau
    pub plateau_window: usize,
    /// Minimum distinct workout dates for most-improved ranking
    pub min_occurrences: usize,
    /// Default result count for rankings and leaderboards
    pub top_n: usize,
    /// Default trend granularity: week, month, or year
    pub period: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            plateau_window: 3,
            min_occurrences: 3,
            top_n: 5,
            period: "month".to_string(),
        }
    }
}

/// Balance thresholds, as plain floats for TOML ergonomics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSettings {
    pub push_dominant: f64,
    pub push_dominant_high: f64,
    pub pull_dominant: f64,
    pub pull_dominant_high: f64,
    pub upper_dominant: f64,
    pub upper_dominant_high: f64,
    pub lower_dominant: f64,
    pub lower_dominant_high: f64,
    pub min_core_share: f64,
    pub min_group_share: f64,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        BalanceSettings {
            push_dominant: 1.3,
            push_dominant_high: 1.6,
            pull_dominant: 0.7,
            pull_dominant_high: 0.4,
            upper_dominant: 2.0,
            upper_dominant_high: 3.0,
            lower_dominant: 0.5,
            lower_dominant_high: 0.3,
            min_core_share: 5.0,
            min_group_share: 10.0,
        }
    }
}

impl BalanceSettings {
    pub fn thresholds(&self) -> BalanceThresholds {
        let defaults = BalanceThresholds::default();
        let dec = |value: f64, fallback: Decimal| Decimal::from_f64(value).unwrap_or(fallback);
        BalanceThresholds {
            push_dominant: dec(self.push_dominant, defaults.push_dominant),
            push_dominant_high: dec(self.push_dominant_high, defaults.push_dominant_high),
            pull_dominant: dec(self.pull_dominant, defaults.pull_dominant),
            pull_dominant_high: dec(self.pull_dominant_high, defaults.pull_dominant_high),
            upper_dominant: dec(self.upper_dominant, defaults.upper_dominant),
            upper_dominant_high: dec(self.upper_dominant_high, defaults.upper_dominant_high),
            lower_dominant: dec(self.lower_dominant, defaults.lower_dominant),
            lower_dominant_high: dec(self.lower_dominant_high, defaults.lower_dominant_high),
            min_core_share: dec(self.min_core_share, defaults.min_core_share),
            min_group_share: dec(self.min_group_share, defaults.min_group_share),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Override for the records file; defaults to the platform data dir
    pub path: Option<PathBuf>,
}

impl RegistrySettings {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gymrs")
                .join("records.json")
        })
    }
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gymrs").join("config.toml"))
}

impl AppConfig {
    /// Load from an explicit path; a missing file is an error here, since
    /// the user asked for it specifically
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GymRsError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            GymRsError::Configuration(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Load from the default location, falling back to defaults when no
    /// config file exists
    pub fn load_default() -> Result<AppConfig> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(AppConfig::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| GymRsError::Configuration(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.import.separator, ';');
        assert_eq!(config.analysis.plateau_window, 3);
        assert_eq!(config.analysis.period, "month");
        assert_eq!(config.balance.thresholds(), BalanceThresholds::default());
    }

    #[test]
    fn test_non_ascii_separator_falls_back_to_default() {
        let settings = ImportSettings { separator: '→' };
        assert_eq!(settings.separator_byte(), b';');

        let settings = ImportSettings { separator: ',' };
        assert_eq!(settings.separator_byte(), b',');
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [import]
            separator = ","

            [analysis]
            plateau_window = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.import.separator, ',');
        assert_eq!(config.analysis.plateau_window, 5);
        assert_eq!(config.analysis.min_occurrences, 3);
        assert_eq!(config.balance, BalanceSettings::default());
    }

    #[test]
    fn test_balance_thresholds_from_floats() {
        let config: AppConfig = toml::from_str(
            r#"
            [balance]
            push_dominant = 1.5
            "#,
        )
        .unwrap();
        let thresholds = config.balance.thresholds();
        assert_eq!(thresholds.push_dominant, dec!(1.5));
        assert_eq!(thresholds.pull_dominant, dec!(0.7));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.analysis.top_n = 10;
        config.save(&path).unwrap();

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "analysis = 12").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
