use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::answers::AnswerSet;
use super::engine::{ClassificationEngine, ClassificationResult};
use super::repository::{QuizRecord, QuizRecordRepository, RecordId, RepositoryError};
use super::table::CategoryView;

/// Service composing the classification engine with record storage.
pub struct ConstitutionQuizService<R> {
    engine: Arc<ClassificationEngine>,
    repository: Arc<R>,
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id() -> RecordId {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("quiz-{id:06}"))
}

impl<R> ConstitutionQuizService<R>
where
    R: QuizRecordRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ClassificationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            repository,
        }
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    /// Classify without recording anything.
    pub fn classify(&self, answers: &AnswerSet) -> ClassificationResult {
        self.engine.classify(answers)
    }

    /// Classify a questionnaire and store the outcome.
    pub fn submit(&self, answers: &AnswerSet) -> Result<QuizRecord, QuizServiceError> {
        let result = self.engine.classify(answers);
        let record = QuizRecord {
            id: next_record_id(),
            primary: result
                .primary()
                .map(|finding| finding.display_name.clone()),
            recorded_at: Utc::now(),
            result,
        };

        let stored = self.repository.insert(record)?;
        info!(
            record_id = %stored.id.0,
            answered = answers.answered(),
            primary = stored.primary.as_deref().unwrap_or("none"),
            "constitution quiz classified"
        );
        Ok(stored)
    }

    /// Fetch a stored outcome for API responses.
    pub fn get(&self, id: &RecordId) -> Result<QuizRecord, QuizServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn categories(&self) -> Vec<CategoryView> {
        self.engine.table().views()
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
