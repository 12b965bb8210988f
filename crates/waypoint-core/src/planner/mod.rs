//! High-level planner API.
//!
//! [`Planner`] is the single entry point for the caller-facing operations:
//! managing seeds, running elaboration sessions and converting a finished
//! specification into a stored project. Every database call opens its own
//! connection on a blocking thread; the planner itself holds no connection.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`seed_ops`]: Seed creation and lookup
//! - [`elaboration_ops`]: Starting sessions, submitting answers, progress
//! - [`project_ops`]: Synthesis and project queries
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint_core::{params::{CreateSeed, Id}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let seed = planner
//!     .create_seed(&CreateSeed {
//!         title: "Green futures".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let turn = planner.start_elaboration(&Id { id: seed.id }).await?;
//! println!("{}", turn.prompt.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use jiff::{civil::Date, Zoned};
use tokio::sync::Mutex;

use crate::{
    config::PlanningConfig, countries::CountryClassifier, elaboration::Elaborator,
    error::PlannerError,
};

pub mod builder;
pub mod elaboration_ops;
pub mod project_ops;
pub mod seed_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) config: PlanningConfig,
    pub(crate) elaborator: Elaborator,
    pub(crate) countries: Arc<dyn CountryClassifier>,
    today: Option<Date>,
    /// One lock per seed so answers to a session are processed in order
    session_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl Planner {
    pub(crate) fn new(
        db_path: PathBuf,
        config: PlanningConfig,
        elaborator: Elaborator,
        countries: Arc<dyn CountryClassifier>,
        today: Option<Date>,
    ) -> Self {
        Self {
            db_path,
            config,
            elaborator,
            countries,
            today,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Path of the SQLite database this planner writes to.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// The date all relative planning starts from.
    pub(crate) fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Lock serializing session updates for one seed.
    pub(crate) async fn session_lock(&self, seed_id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        // Entries only the map still holds are idle
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(seed_id).or_default())
    }
}

/// Runs a blocking database closure on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> crate::error::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(PlannerError::join)?
}
