//! Turning a seed into a complete specification through a conversation.
//!
//! The pieces compose as pure steps over [`SpecificationState`]:
//! [`next_question`] picks what to ask, an [`Extractor`] reads the answer,
//! [`merge`] folds the value in and [`score`] recomputes completeness. The
//! [`Elaborator`] wires them into start/answer turns.
//!
//! [`SpecificationState`]: crate::models::SpecificationState

pub mod extraction;
pub mod flow;
pub mod heuristic;
pub mod merge;
pub mod questions;
pub mod scoring;
pub mod session;

pub use extraction::{
    extract_bounded, ExtractedValue, ExtractionContract, ExtractionError, Extractor,
};
pub use flow::{current_question, next_question};
pub use heuristic::HeuristicExtractor;
pub use merge::{merge, recompute_visas};
pub use questions::{question_for, FlowContext, QuestionDefinition, Validation, QUESTIONS};
pub use scoring::{missing_fields, rescore, score};
pub use session::{ElaborationProgress, ElaborationTurn, Elaborator, COMPLETE_MESSAGE};
