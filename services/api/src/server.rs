use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use prioritizer::config::AppConfig;
use prioritizer::error::AppError;
use prioritizer::projects::ProjectService;
use prioritizer::scoring::ScoringEngine;
use prioritizer::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{default_profiles, seed_releases, AppState, InMemoryProjectRepository};
use crate::routes::with_project_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        planning_year: config.planning.year,
        profiles: Arc::new(default_profiles()),
    };

    let repository = Arc::new(InMemoryProjectRepository::default());
    let releases = seed_releases(config.planning.year);
    let project_service = Arc::new(ProjectService::new(
        repository,
        ScoringEngine::standard(),
        releases,
    ));

    let app = with_project_routes(project_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "project prioritization service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
