use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::ClassificationResult;

/// Identifier wrapper for stored quiz outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// One classified questionnaire as kept by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: RecordId,
    /// Display name of the top finding, if any qualified.
    pub primary: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub result: ClassificationResult,
}

/// Storage abstraction so the service can be exercised without a database.
pub trait QuizRecordRepository: Send + Sync {
    fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<QuizRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
