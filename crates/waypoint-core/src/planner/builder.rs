//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::civil::Date;

use super::{blocking, Planner};
use crate::{
    config::PlanningConfig,
    countries::{CountryClassifier, StaticCountries},
    db::Database,
    elaboration::{Elaborator, Extractor, HeuristicExtractor},
    error::{PlannerError, Result},
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    config: PlanningConfig,
    extractor: Option<Arc<dyn Extractor>>,
    countries: Option<Arc<dyn CountryClassifier>>,
    today: Option<Date>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            config: PlanningConfig::default(),
            extractor: None,
            countries: None,
            today: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the built-in heuristic extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Replaces the static country table.
    pub fn with_country_classifier(mut self, countries: Arc<dyn CountryClassifier>) -> Self {
        self.countries = Some(countries);
        self
    }

    /// Pins "today" instead of reading the system clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` if the configuration is invalid
    /// Returns `PlannerError::FileSystem` if the database path is invalid
    /// Returns `PlannerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Planner> {
        self.config.validate()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok(())
        })
        .await?;

        let countries: Arc<dyn CountryClassifier> = self
            .countries
            .unwrap_or_else(|| Arc::new(StaticCountries));
        let extractor: Arc<dyn Extractor> = match self.extractor {
            Some(extractor) => extractor,
            None => Arc::new(HeuristicExtractor::new(Arc::clone(&countries)).map_err(|e| {
                PlannerError::Configuration {
                    message: format!("Failed to compile extraction patterns: {e}"),
                }
            })?),
        };
        let elaborator = Elaborator::new(self.config.clone(), extractor, Arc::clone(&countries));

        Ok(Planner::new(
            db_path,
            self.config,
            elaborator,
            countries,
            self.today,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
