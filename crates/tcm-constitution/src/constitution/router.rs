use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::answers::AnswerSet;
use super::engine::ClassificationResult;
use super::repository::{QuizRecordRepository, RecordId, RepositoryError};
use super::service::{ConstitutionQuizService, QuizServiceError};

/// Quiz submission response: the classification plus the id it was stored under.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub record_id: RecordId,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Router builder exposing the questionnaire endpoints.
pub fn quiz_router<R>(service: Arc<ConstitutionQuizService<R>>) -> Router
where
    R: QuizRecordRepository + 'static,
{
    Router::new()
        .route("/api/v1/constitution/quiz", post(submit_handler::<R>))
        .route(
            "/api/v1/constitution/quiz/:record_id",
            get(record_handler::<R>),
        )
        .route("/api/v1/constitution/categories", get(categories_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ConstitutionQuizService<R>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response
where
    R: QuizRecordRepository + 'static,
{
    let Value::Object(map) = body else {
        let payload = json!({
            "error": "questionnaire answers must be a JSON object",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let answers = AnswerSet::from_json_object(&map);
    match service.submit(&answers) {
        Ok(record) => {
            let response = QuizResponse {
                record_id: record.id,
                result: record.result,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn record_handler<R>(
    State(service): State<Arc<ConstitutionQuizService<R>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: QuizRecordRepository + 'static,
{
    let id = RecordId(record_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(QuizServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "record_id": id.0,
                "error": "quiz record not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<ConstitutionQuizService<R>>>,
) -> Response
where
    R: QuizRecordRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.categories())).into_response()
}
