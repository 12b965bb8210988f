//! Core library for the Waypoint youth-exchange planner.
//!
//! A project starts as a [`models::Seed`], a rough idea. An elaboration
//! session then asks a fixed series of questions, extracting structured
//! answers into a [`models::SpecificationState`] and scoring how complete
//! it is. Once every required answer is in, synthesis turns the
//! specification into a [`models::Project`] with a timeline, a budget
//! split, the requirements to arrange and a list of phases with checklists.
//!
//! - [`elaboration`]: question flow, extraction, merging and scoring
//! - [`synthesis`]: the pure generators and their orchestration
//! - [`db`]: SQLite persistence
//! - [`planner`]: the async facade the CLI talks to
//! - [`display`]: markdown rendering
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     params::{CreateSeed, Id, SubmitAnswer},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("exchange.db"))
//!     .build()
//!     .await?;
//!
//! let seed = planner
//!     .create_seed(&CreateSeed {
//!         title: "Digital citizenship".to_string(),
//!         description: Some("Media literacy for young Europeans".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let turn = planner.start_elaboration(&Id { id: seed.id }).await?;
//! println!("{turn}");
//!
//! let turn = planner
//!     .submit_answer(&SubmitAnswer {
//!         seed_id: seed.id,
//!         session_id: None,
//!         answer: "About 30 participants".to_string(),
//!     })
//!     .await?;
//! println!("{turn}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod countries;
pub mod db;
pub mod display;
pub mod elaboration;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod synthesis;

pub use config::PlanningConfig;
pub use countries::{CountryClassifier, StaticCountries};
pub use db::Database;
pub use display::{ConversionResult, CreateResult, LocalDateTime, ProjectSummaries, Seeds};
pub use elaboration::{ElaborationProgress, ElaborationTurn, Extractor, HeuristicExtractor};
pub use error::{PlannerError, Result};
pub use params::{CreateSeed, Id, ListProjects, SubmitAnswer};
pub use planner::{Planner, PlannerBuilder};
