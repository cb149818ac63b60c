use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tcm_constitution::constitution::{
    QuizRecord, QuizRecordRepository, RecordId, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local record store; records are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryQuizRecordRepository {
    records: Arc<Mutex<HashMap<RecordId, QuizRecord>>>,
}

impl QuizRecordRepository for InMemoryQuizRecordRepository {
    fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store poisoned".to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<QuizRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

#[cfg(test)]
impl InMemoryQuizRecordRepository {
    pub(crate) fn len(&self) -> usize {
        self.records
            .lock()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }
}
