use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryQuizRecordRepository};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tcm_constitution::config::AppConfig;
use tcm_constitution::constitution::{
    ClassificationEngine, ClassificationThresholds, ConstitutionQuizService,
};
use tcm_constitution::error::AppError;
use tcm_constitution::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // An invalid table aborts startup before the listener is bound.
    let table = config.classification.load_table()?;
    info!(
        categories = table.len(),
        balanced = %table.balanced_key(),
        source = ?config.classification.table_path,
        "category table loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryQuizRecordRepository::default());
    let engine = ClassificationEngine::new(table, ClassificationThresholds::default());
    let quiz_service = Arc::new(ConstitutionQuizService::new(repository, engine));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "constitution quiz service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
