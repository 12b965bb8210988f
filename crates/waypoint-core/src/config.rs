//! Tunable planning defaults and their loading.
//!
//! Everything here is configuration rather than business rule: the default
//! group size, preparation bounds, flat visa cost and so on. Values are read
//! from a JSON file and every missing key falls back to its default.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Planning configuration shared by elaboration and synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Participant count assumed when budget arrives before the head count
    pub default_participants: u32,

    /// Exchange length used for suggestions when nothing is known yet
    pub default_duration_days: u32,

    /// Days from today until the exchange starts when no start date is set
    pub start_horizon_days: u32,

    /// Length of the follow-up (reporting) window
    pub follow_up_days: u32,

    /// Shortest preparation window, in weeks
    pub min_preparation_weeks: u32,

    /// Longest preparation window, in weeks
    pub max_preparation_weeks: u32,

    /// Flat per-person visa cost estimate (EUR)
    pub visa_cost_per_person: u64,

    /// Group size from which a group travel policy is used
    pub group_insurance_threshold: u32,

    /// Upper bound for a single extraction call, in milliseconds
    pub extraction_timeout_ms: u64,

    /// Per-day component of the suggested budget per participant (EUR)
    pub daily_rate_per_person: u64,

    /// Fixed component of the suggested budget per participant (EUR)
    pub base_cost_per_person: u64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            default_participants: 28,
            default_duration_days: 7,
            start_horizon_days: 120,
            follow_up_days: 30,
            min_preparation_weeks: 6,
            max_preparation_weeks: 12,
            visa_cost_per_person: 80,
            group_insurance_threshold: 10,
            extraction_timeout_ms: 10_000,
            daily_rate_per_person: 50,
            base_cost_per_person: 150,
        }
    }
}

impl PlanningConfig {
    /// Load configuration with a fallback chain.
    ///
    /// An explicit path must exist and parse. Otherwise
    /// `$XDG_CONFIG_HOME/waypoint/config.json` is used when present, and the
    /// built-in defaults when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::user_config_path() {
            Some(user_config) => Self::load_from_file(&user_config),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and validates a JSON configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Rejects settings that would break the generators.
    pub fn validate(&self) -> Result<()> {
        if self.min_preparation_weeks == 0 {
            return Err(PlannerError::Configuration {
                message: "min_preparation_weeks must be at least 1".to_string(),
            });
        }
        if self.min_preparation_weeks > self.max_preparation_weeks {
            return Err(PlannerError::Configuration {
                message: format!(
                    "min_preparation_weeks ({}) exceeds max_preparation_weeks ({})",
                    self.min_preparation_weeks, self.max_preparation_weeks
                ),
            });
        }
        if self.follow_up_days == 0 {
            return Err(PlannerError::Configuration {
                message: "follow_up_days must be at least 1".to_string(),
            });
        }
        if self.default_participants == 0 {
            return Err(PlannerError::Configuration {
                message: "default_participants must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Timeout applied to every extraction call.
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    fn user_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint").find_config_file("config.json")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_participants": 30, "follow_up_days": 21 }}"#).unwrap();

        let config = PlanningConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_participants, 30);
        assert_eq!(config.follow_up_days, 21);
        assert_eq!(config.visa_cost_per_person, 80);
        assert_eq!(config.max_preparation_weeks, 12);
    }

    #[test]
    fn test_inverted_preparation_bounds_rejected() {
        let config = PlanningConfig {
            min_preparation_weeks: 10,
            max_preparation_weeks: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlannerError::Configuration { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = PlanningConfig::load(Some(Path::new("/nonexistent/waypoint.json")));
        assert!(matches!(result, Err(PlannerError::FileSystem { .. })));
    }
}
