//! Body-constitution questionnaire classification.
//!
//! The engine is a pure function of an [`AnswerSet`] and a validated
//! [`CategoryTable`]. Storage and HTTP concerns sit around it in the
//! repository, service, and router modules.

pub mod answers;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;
pub mod table;

#[cfg(test)]
mod tests;

pub use answers::{AnswerSet, DEFAULT_ANSWER};
pub use engine::{
    CategoryScore, ClassificationEngine, ClassificationResult, ClassificationThresholds,
    ConstitutionFinding, ConstitutionStatus, MAX_SELECTED, SUMMARY_DELIMITER,
};
pub use repository::{QuizRecord, QuizRecordRepository, RecordId, RepositoryError};
pub use router::{quiz_router, QuizResponse};
pub use service::{ConstitutionQuizService, QuizServiceError};
pub use table::{Category, CategoryTable, CategoryTableError, CategoryView};
