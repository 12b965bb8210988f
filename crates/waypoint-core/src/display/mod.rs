//! Markdown formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so the same data
//! can be rendered differently per context. The CLI passes the output
//! through its terminal renderer.
//!
//! - [`collections`]: [`Seeds`], [`ProjectSummaries`]
//! - [`results`]: [`CreateResult`], [`ConversionResult`]
//! - [`datetime`]: [`LocalDateTime`]

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{ProjectSummaries, Seeds};
pub use datetime::LocalDateTime;
pub use results::{ConversionResult, CreateResult};
