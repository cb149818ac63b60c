use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::constitution::repository::{QuizRecord, QuizRecordRepository, RecordId, RepositoryError};
use crate::constitution::{
    AnswerSet, Category, CategoryTable, ClassificationEngine, ClassificationThresholds,
    ConstitutionQuizService,
};

fn category(key: &str, items: RangeInclusive<u16>) -> Category {
    Category {
        key: key.to_string(),
        display_name: key.to_uppercase(),
        item_indices: items.collect(),
        advice: format!("{key} advice"),
    }
}

/// Small table with item counts chosen so exact threshold scores are reachable:
/// five-item categories move in steps of 5, `beta` (seven items) can land on 29.
pub(super) fn compact_table() -> CategoryTable {
    CategoryTable::new(
        "calm",
        vec![
            category("alpha", 1..=5),
            category("beta", 6..=12),
            category("gamma", 13..=17),
            category("delta", 18..=22),
            category("calm", 23..=27),
        ],
    )
    .expect("compact table is valid")
}

pub(super) const ALPHA: RangeInclusive<u16> = 1..=5;
pub(super) const BETA: RangeInclusive<u16> = 6..=12;
pub(super) const GAMMA: RangeInclusive<u16> = 13..=17;
pub(super) const DELTA: RangeInclusive<u16> = 18..=22;
pub(super) const CALM: RangeInclusive<u16> = 23..=27;

pub(super) fn compact_engine() -> ClassificationEngine {
    ClassificationEngine::new(compact_table(), ClassificationThresholds::default())
}

/// Answers raising the raw score of `items` by `excess` above the all-ones floor.
pub(super) fn spread(items: RangeInclusive<u16>, excess: i64) -> Vec<(u16, i64)> {
    let mut remaining = excess;
    items
        .map(|index| {
            let bump = remaining.clamp(0, 4);
            remaining -= bump;
            (index, 1 + bump)
        })
        .collect()
}

pub(super) fn answers(parts: Vec<Vec<(u16, i64)>>) -> AnswerSet {
    parts.into_iter().flatten().collect()
}

pub(super) fn standard_engine() -> ClassificationEngine {
    ClassificationEngine::standard()
}

/// Standard-table answers where only the balanced category clears its threshold.
pub(super) fn balanced_answers() -> AnswerSet {
    let pairs: [(u16, i64); 8] = [
        (1, 5),
        (5, 5),
        (13, 5),
        (2, 3),
        (4, 3),
        (19, 3),
        (25, 3),
        (26, 2),
    ];
    pairs.into_iter().collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RecordId, QuizRecord>>>,
}

impl QuizRecordRepository for MemoryRepository {
    fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<QuizRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl QuizRecordRepository for UnavailableRepository {
    fn insert(&self, _record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<QuizRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ConstitutionQuizService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ConstitutionQuizService::new(repository.clone(), standard_engine());
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
